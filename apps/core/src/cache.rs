use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::record::PlayerRecord;

/// Anything that can answer an API route with player records.
#[async_trait(?Send)]
pub trait RecordSource {
    async fn fetch_records(&self, endpoint: Endpoint) -> Result<Vec<PlayerRecord>, ApiError>;
}

type Players = Result<Rc<[PlayerRecord]>, ApiError>;
type SharedFetch = Shared<LocalBoxFuture<'static, Players>>;

/// Page-lifetime memo of the full player list.
///
/// The first `get` starts the fetch; every caller, including those that
/// arrive while it is still in flight, awaits the same shared future. The
/// result, success or failure, is kept until the page is reloaded.
pub struct PlayerCache {
    source: Rc<dyn RecordSource>,
    slot: RefCell<Option<SharedFetch>>,
}

impl PlayerCache {
    pub fn new(source: Rc<dyn RecordSource>) -> Self {
        Self {
            source,
            slot: RefCell::new(None),
        }
    }

    pub async fn get(&self) -> Players {
        self.shared_fetch().await
    }

    /// Exact-name lookup against the cached list.
    pub async fn find(&self, name: &str) -> Result<Option<PlayerRecord>, ApiError> {
        let players = self.get().await?;
        Ok(players.iter().find(|player| player.name == name).cloned())
    }

    fn shared_fetch(&self) -> SharedFetch {
        let mut slot = self.slot.borrow_mut();
        slot.get_or_insert_with(|| load_players(Rc::clone(&self.source)).boxed_local().shared())
            .clone()
    }
}

async fn load_players(source: Rc<dyn RecordSource>) -> Players {
    let records: Rc<[PlayerRecord]> = source.fetch_records(Endpoint::Players).await?.into();
    log::debug!("cached {} players", records.len());
    Ok(records)
}
