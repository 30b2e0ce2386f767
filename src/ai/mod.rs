//! Players: the agent interface plus human, random, scripted, greedy and
//! external-policy implementations.

mod agent;
mod greedy;
mod human;
mod policy;
mod random;
mod scripted;

pub use agent::{Agent, Transition};
pub use greedy::GreedyAgent;
pub use human::{parse_column, HumanAgent, LineInput};
pub use policy::{Policy, PolicyAgent};
pub use random::RandomAgent;
pub use scripted::ScriptedAgent;

#[cfg(test)]
pub(crate) use policy::tests::CountingPolicy;
