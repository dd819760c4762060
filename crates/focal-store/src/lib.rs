pub mod actions;
pub mod cache;
pub mod interactions;
pub mod pager;
pub mod profile;

pub use actions::{ActionError, Actions, SocialApi};
pub use cache::{QueryCache, QueryKey};
pub use interactions::{InteractionSnapshot, InteractionStore, Provenance};
pub use pager::{FetchOutcome, PageFuture, Pager};
pub use profile::{ProfileSnapshot, ProfileStore};

/// Page sizes the views request per list, matching what the server tunes for.
pub mod limits {
    pub const FEED: u32 = 10;
    pub const COMMENTS: u32 = 10;
    pub const POST_LIKES: u32 = 5;
    pub const MY_LIKES: u32 = 5;
    pub const MY_SAVED: u32 = 5;
    pub const FOLLOWERS: u32 = 10;
    pub const MY_FOLLOWING: u32 = 50;
    pub const USER_SEARCH: u32 = 10;
}
