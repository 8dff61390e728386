//! Search domain - completions, places and the backends that produce them

mod backend;
mod completion;
mod map_item;
mod request;

pub use backend::{CompletionBackend, SceneBackend, SearchBackend};
pub use completion::{highlight_segments, SearchCompletion, TextRange};
pub use map_item::{MapItem, ResultType};
pub use request::{LookAroundScene, SearchRequest};

#[cfg(test)]
pub use backend::mock::{MockCompletionBackend, MockSceneBackend, MockSearchBackend};
