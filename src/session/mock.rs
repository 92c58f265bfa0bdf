//! Mock token source for isolating the fetch client in tests.

use mockall::mock;

use crate::session::TokenSource;

mock! {
    pub Session {}

    impl TokenSource for Session {
        fn bearer_token(&self) -> Option<String>;
    }
}
