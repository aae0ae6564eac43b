//! Agent kinds and the roster view a human sees during its update.

use crate::{
    animal::AnimalPresence,
    human::Human,
    secondary::SicknessLookup,
    sickness::SicknessRecord,
    types::{AgentId, HealthStatus, Location},
};
use std::collections::BTreeMap;

/// The two kinds of agent. Closed set: dispatch is a match, not a vtable.
#[derive(Debug, Clone)]
pub enum Agent {
    Human(Human),
    Animal(AnimalPresence),
}

impl Agent {
    pub fn id(&self) -> AgentId {
        match self {
            Agent::Human(h) => h.id(),
            Agent::Animal(a) => a.id(),
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Agent::Human(h) => h.location(),
            Agent::Animal(a) => a.location(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Agent::Human(_) => "human",
            Agent::Animal(_) => "animal",
        }
    }
}

impl From<Human> for Agent {
    fn from(human: Human) -> Self {
        Agent::Human(human)
    }
}

impl From<AnimalPresence> for Agent {
    fn from(animal: AnimalPresence) -> Self {
        Agent::Animal(animal)
    }
}

/// Post-move state of one human, frozen for the whole update phase.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HumanView {
    pub id:            AgentId,
    pub location:      Location,
    pub status:        HealthStatus,
    pub output_hazard: f64,
    pub sickness:      Vec<SicknessRecord>,
}

impl HumanView {
    fn capture(human: &Human) -> Self {
        Self {
            id:            human.id(),
            location:      human.location(),
            status:        human.status(),
            output_hazard: human.hazard().output_hazard,
            sickness:      human.sickness_records().to_vec(),
        }
    }
}

/// The roster as every human sees it during the update phase. Captured
/// once after the move phase, so an update never observes a status flip
/// or a sickness record written earlier in the same tick.
pub(crate) struct Population<'a> {
    views: Vec<HumanView>,
    index: &'a BTreeMap<AgentId, usize>,
}

impl<'a> Population<'a> {
    /// `index` maps each id to its roster position in `humans`.
    pub(crate) fn capture(humans: &[Human], index: &'a BTreeMap<AgentId, usize>) -> Self {
        Self { views: humans.iter().map(HumanView::capture).collect(), index }
    }

    /// Roster order, skipping `me`.
    pub(crate) fn excluding(&self, me: AgentId) -> impl Iterator<Item = &HumanView> {
        self.views.iter().filter(move |view| view.id != me)
    }

    pub(crate) fn get(&self, id: AgentId) -> Option<&HumanView> {
        self.views.get(*self.index.get(&id)?)
    }
}

impl SicknessLookup for Population<'_> {
    fn sickness_records(&self, id: AgentId) -> Option<&[SicknessRecord]> {
        self.get(id).map(|view| view.sickness.as_slice())
    }
}
