use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Shared teardown flag of one entrance.
///
/// Clones observe the same flag. Once torn down, every in-flight read, write
/// or confirmation wait of the entrance is abandoned and its result dropped.
#[derive(Clone, Debug)]
pub struct TeardownHandle {
    flag: Arc<watch::Sender<bool>>,
}

impl Default for TeardownHandle {
    fn default() -> Self {
        let (flag, _) = watch::channel(false);
        TeardownHandle {
            flag: Arc::new(flag),
        }
    }
}

impl TeardownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teardown(&self) {
        self.flag.send_replace(true);
    }

    pub fn is_torn_down(&self) -> bool {
        *self.flag.borrow()
    }

    /// Run `fut` unless teardown happens first, in which case `None`.
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        let mut torn_down = self.flag.subscribe();
        tokio::select! {
            biased;
            Ok(_) = torn_down.wait_for(|down| *down) => None,
            output = fut => Some(output),
        }
    }
}
