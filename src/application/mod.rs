mod automaton;
mod config;

pub use automaton::Automaton;
pub use config::AutomatonConfig;
