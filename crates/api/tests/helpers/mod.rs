#![allow(dead_code)]

mod mock_observer;
mod mock_upstream;

pub use mock_observer::RecordingObserver;
pub use mock_upstream::{
    build_query, create_test_app, create_test_app_with_observer, MockUpstream, Reply,
};
