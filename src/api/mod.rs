pub mod client;
pub mod endpoints;
pub mod normalize;
pub mod transport;

pub use client::{RiotApiClient, SummonerQuery};
pub use transport::{RequestContext, Transport, TransportResponse, UreqTransport};
