pub mod command_gateway;
pub mod market_poller;
pub mod poll_loop;
pub mod status_poller;
pub mod tournament_flow;

pub use command_gateway::CommandGateway;
pub use market_poller::{refresh_market, run_market_poller};
pub use status_poller::{refresh_status, run_status_poller};
pub use tournament_flow::{JoinOutcome, ModalPhase, TournamentFlow, TournamentSnapshot};
