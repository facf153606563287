#[cfg(test)]
mod tests {
    use crate::services::{MemorySessionStore, SessionStore, PROFILE_KEY, TOKEN_KEY};
    use std::sync::Arc;

    #[test]
    fn test_set_get_remove() {
        let store = MemorySessionStore::new();
        assert!(store.is_empty());

        store.set_item(TOKEN_KEY, "abc");
        store.set_item(PROFILE_KEY, "{}");
        assert_eq!(store.get_item(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(store.len(), 2);

        store.set_item(TOKEN_KEY, "def");
        assert_eq!(store.get_item(TOKEN_KEY).as_deref(), Some("def"));

        store.remove_item(TOKEN_KEY);
        assert_eq!(store.get_item(TOKEN_KEY), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let store = MemorySessionStore::new();
        store.remove_item("missing");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_is_shared_across_tasks() {
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let writer = store.clone();

        tokio::spawn(async move {
            writer.set_item(TOKEN_KEY, "from-task");
        })
        .await
        .unwrap();

        assert_eq!(store.get_item(TOKEN_KEY).as_deref(), Some("from-task"));
    }
}
