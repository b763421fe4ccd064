//! Shared context for fetch operations

use efetch_errors::Error;
use efetch_events::EventSender;
use efetch_net::{Mirror, NetClient};

/// Everything a fetch needs besides the request itself.
///
/// The context is cheap to clone; each spawned download task takes its own
/// copy, so the tasks share no mutable state.
#[derive(Clone)]
pub struct FetchContext {
    pub client: NetClient,
    pub mirror: Mirror,
    pub tx: EventSender,
}

impl FetchContext {
    /// Context with a default client and release store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(tx: EventSender) -> Result<Self, Error> {
        Ok(Self {
            client: NetClient::with_defaults()?,
            mirror: Mirror::default(),
            tx,
        })
    }

    /// Same context aimed at a different release store base
    #[must_use]
    pub fn with_mirror(mut self, mirror: Mirror) -> Self {
        self.mirror = mirror;
        self
    }
}
