//! Session registry keyed by player id

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use cf_core::CascadeConfig;

use crate::session::StandardSession;

/// Hands out one [`StandardSession`] per player, created on first use
pub struct SessionRegistry {
    config: Arc<CascadeConfig>,
    sessions: RwLock<HashMap<String, Arc<StandardSession>>>,
}

impl SessionRegistry {
    pub fn new(config: CascadeConfig) -> Self {
        Self {
            config: Arc::new(config),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Session for `player_id`, creating an empty one if needed
    pub fn session(&self, player_id: &str) -> Arc<StandardSession> {
        if let Some(session) = self.sessions.read().get(player_id) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write();
        let session = sessions.entry(player_id.to_string()).or_insert_with(|| {
            log::info!("New session for player {player_id}");
            Arc::new(StandardSession::standard(Arc::clone(&self.config)))
        });
        Arc::clone(session)
    }

    /// Existing session, if any
    pub fn get(&self, player_id: &str) -> Option<Arc<StandardSession>> {
        self.sessions.read().get(player_id).cloned()
    }

    /// Drop a player's session; in-flight callers keep their handle
    pub fn remove(&self, player_id: &str) -> Option<Arc<StandardSession>> {
        self.sessions.write().remove(player_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(CascadeConfig::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_player_same_session() {
        let registry = SessionRegistry::default();
        let a = registry.session("alice");
        a.deposit(100).unwrap();

        let again = registry.session("alice");
        assert!(Arc::ptr_eq(&a, &again));
        assert_eq!(again.check_data().unwrap().balance, 100);

        let b = registry.session("bob");
        assert_eq!(b.check_data().unwrap().balance, 0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove() {
        let registry = SessionRegistry::default();
        registry.session("carol");
        assert!(registry.get("carol").is_some());
        assert!(registry.remove("carol").is_some());
        assert!(registry.get("carol").is_none());
        assert!(registry.is_empty());
    }
}
