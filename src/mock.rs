//! Mock collaborators for isolating list controllers in tests.

use mockall::mock;

use crate::models::event::{ListEvent, ListEventSink};
use crate::navigation::{Location, Navigator};

mock! {
    pub Navigator {}

    impl Navigator for Navigator {
        fn location(&self) -> Location;
        fn replace_query(&self, query: &str);
    }
}

mock! {
    pub ListEventSink {}

    impl ListEventSink for ListEventSink {
        fn dispatch(&self, event: ListEvent);
    }
}
