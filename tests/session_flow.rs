//! End-to-end session workflows driven through the public API: the
//! session manager spawns real session tasks, input events go in through
//! a handle, rendered frames and clipboard writes come back out.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use termpaste::{
    clipboard, Geometry, InputEvent, KeyInput, MemoryStore, PasteId, PasteStore, SessionHandle,
    SessionManager,
};

const WAIT: Duration = Duration::from_secs(5);

struct Client {
    input: mpsc::Sender<InputEvent>,
    output: mpsc::Receiver<Vec<u8>>,
}

fn attach(manager: &SessionManager) -> Client {
    let (input_tx, input_rx) = mpsc::channel(64);
    let (output_tx, output_rx) = mpsc::channel(64);
    manager.attach(SessionHandle {
        geometry: Geometry {
            width: 80,
            height: 24,
        },
        term: "xterm-256color".into(),
        input: input_rx,
        output: output_tx,
    });
    Client {
        input: input_tx,
        output: output_rx,
    }
}

impl Client {
    async fn key(&self, key: KeyInput) {
        self.input
            .send(InputEvent::Key(key))
            .await
            .expect("session gone while sending key");
    }

    async fn type_str(&self, s: &str) {
        for c in s.chars() {
            self.key(KeyInput::Char(c)).await;
        }
    }

    async fn submit(&self, s: &str) {
        self.type_str(s).await;
        self.key(KeyInput::Enter).await;
    }

    /// Drain frames until one contains `needle`, returning it as text.
    async fn wait_for(&mut self, needle: &str) -> String {
        timeout(WAIT, async {
            loop {
                let frame = self
                    .output
                    .recv()
                    .await
                    .unwrap_or_else(|| panic!("session closed while waiting for {needle:?}"));
                let text = String::from_utf8_lossy(&frame).into_owned();
                if text.contains(needle) {
                    return text;
                }
            }
        })
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {needle:?}"))
    }

    /// Wait until the session task closes the output side.
    async fn wait_for_close(&mut self) {
        timeout(WAIT, async {
            while self.output.recv().await.is_some() {}
        })
        .await
        .expect("session never closed");
    }
}

fn extract_id(created_frame: &str) -> String {
    let at = created_frame.find("ID: ").expect("created frame shows the id");
    created_frame[at + 4..].chars().take(8).collect()
}

async fn create_paste(manager: &SessionManager, content: &str) -> String {
    let mut client = attach(manager);
    client.wait_for("Welcome").await;
    client.key(KeyInput::Char('x')).await;
    client.wait_for("Paste your content below").await;
    client.submit(content).await;
    let frame = client.wait_for("Paste saved").await;
    extract_id(&frame)
}

#[tokio::test]
async fn create_then_retrieve_in_a_fresh_session() {
    let store = Arc::new(MemoryStore::new());
    let manager = SessionManager::new(Arc::clone(&store) as Arc<dyn PasteStore>);

    let id = create_paste(&manager, "hello world").await;
    assert_eq!(id.len(), 8);
    assert!(id.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));

    // A second session retrieves by the literal identifier.
    let mut reader = attach(&manager);
    reader.wait_for("Welcome").await;
    reader.key(KeyInput::Char('r')).await;
    reader.wait_for("Enter paste id").await;
    reader.submit(&id).await;

    // The content reaches the clipboard sink, then the Copied screen.
    let expected = String::from_utf8(clipboard::osc52("hello world")).unwrap();
    reader.wait_for(&expected).await;
    reader.wait_for("Copied to your clipboard").await;
}

#[tokio::test]
async fn retrieve_of_never_written_id_is_key_not_found() {
    let manager = SessionManager::new(Arc::new(MemoryStore::new()));

    let mut client = attach(&manager);
    client.wait_for("Welcome").await;
    client.key(KeyInput::Char('r')).await;
    client.wait_for("Enter paste id").await;
    client.submit("zzzzzzzz").await;
    client.wait_for("No paste with that id").await;

    // The session survives and navigates back to the menu.
    client.key(KeyInput::Char('b')).await;
    client.wait_for("Welcome").await;
}

#[tokio::test]
async fn concurrent_sessions_only_see_their_own_result() {
    let store = Arc::new(MemoryStore::new());
    let manager = Arc::new(SessionManager::new(Arc::clone(&store) as Arc<dyn PasteStore>));

    let (id_a, id_b) = tokio::join!(
        create_paste(&manager, "content from session a"),
        create_paste(&manager, "content from session b"),
    );

    assert_ne!(id_a, id_b);

    // Each Created screen reflected the identifier that session's own
    // workflow generated, so each id maps back to that session's content.
    let a: PasteId = id_a.parse().unwrap();
    let b: PasteId = id_b.parse().unwrap();
    assert_eq!(store.get(&a).await.unwrap(), "content from session a");
    assert_eq!(store.get(&b).await.unwrap(), "content from session b");
}

#[tokio::test]
async fn store_outage_surfaces_as_error_and_is_retryable() {
    let store = Arc::new(MemoryStore::new());
    let manager = SessionManager::new(Arc::clone(&store) as Arc<dyn PasteStore>);
    store.set_available(false);

    let mut client = attach(&manager);
    client.wait_for("Welcome").await;
    client.key(KeyInput::Char('x')).await;
    client.wait_for("Paste your content below").await;
    client.submit("doomed attempt").await;
    client.wait_for("Uh oh").await;

    // The session is alive; once the store recovers, resubmitting works.
    store.set_available(true);
    client.key(KeyInput::Char('b')).await;
    client.wait_for("Welcome").await;
    client.key(KeyInput::Char('x')).await;
    client.wait_for("Paste your content below").await;
    client.submit("second attempt").await;
    client.wait_for("Paste saved").await;
}

#[tokio::test]
async fn outage_in_one_session_leaves_others_untouched() {
    let store = Arc::new(MemoryStore::new());
    let manager = SessionManager::new(Arc::clone(&store) as Arc<dyn PasteStore>);

    // Session A hits an outage.
    store.set_available(false);
    let mut failing = attach(&manager);
    failing.wait_for("Welcome").await;
    failing.key(KeyInput::Char('x')).await;
    failing.wait_for("Paste your content below").await;
    failing.submit("will fail").await;
    failing.wait_for("Uh oh").await;

    // Session B proceeds normally after recovery.
    store.set_available(true);
    let id = create_paste(&manager, "unaffected").await;
    assert_eq!(store.get(&id.parse().unwrap()).await.unwrap(), "unaffected");
}

#[tokio::test]
async fn quit_ends_the_session() {
    let manager = SessionManager::new(Arc::new(MemoryStore::new()));

    let mut client = attach(&manager);
    client.wait_for("Welcome").await;
    client.key(KeyInput::Char('q')).await;
    client.wait_for_close().await;

    // Registry cleanup runs right after the output side closes.
    timeout(WAIT, async {
        while manager.registry().count() != 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("session never left the registry");
}

#[tokio::test]
async fn disconnect_mid_flight_leaves_the_store_usable() {
    let store = Arc::new(MemoryStore::new());
    let manager = SessionManager::new(Arc::clone(&store) as Arc<dyn PasteStore>);

    // Submit a create and vanish before the result can come back.
    let client = attach(&manager);
    client.key(KeyInput::Char('x')).await;
    client.submit("orphaned content").await;
    drop(client);

    // The abandoned call either fully applied or never did; the store
    // keeps serving fresh sessions either way.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let id = create_paste(&manager, "fresh content").await;
    assert_eq!(
        store.get(&id.parse().unwrap()).await.unwrap(),
        "fresh content"
    );
    assert!(store.len().await <= 2);
}

#[tokio::test]
async fn resize_repaints_without_changing_screen() {
    let manager = SessionManager::new(Arc::new(MemoryStore::new()));

    let mut client = attach(&manager);
    client.wait_for("Welcome").await;
    client
        .input
        .send(InputEvent::Resize {
            width: 120,
            height: 40,
        })
        .await
        .unwrap();
    // Still the menu, repainted for the new geometry.
    client.wait_for("Welcome").await;
}
