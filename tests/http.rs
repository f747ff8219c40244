use chrono::{Duration as ChronoDuration, Local};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize, PartialEq)]
struct Task {
    text: String,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct Stats {
    completed: u64,
    total: u64,
    xp: u64,
}

#[derive(Debug, Deserialize)]
struct BoardResponse {
    date: String,
    tasks: Vec<Task>,
    stats: Stats,
    dark_mode: bool,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("taskroll_http_{tag}_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/tasks")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: String) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_taskroll"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(unique_data_path("shared")).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn board(client: &Client, base_url: &str) -> BoardResponse {
    client
        .get(format!("{base_url}/api/tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_add_and_toggle_task() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = board(&client, &server.base_url).await;

    let added: BoardResponse = client
        .post(format!("{}/api/tasks", server.base_url))
        .json(&serde_json::json!({ "text": "  wash dishes " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let index = added.tasks.len() - 1;
    assert_eq!(added.tasks.len(), before.tasks.len() + 1);
    assert_eq!(
        added.tasks[index],
        Task {
            text: "wash dishes".to_string(),
            done: false
        }
    );

    let toggled: BoardResponse = client
        .post(format!("{}/api/tasks/{index}/toggle", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(toggled.tasks[index].done);
    assert_eq!(toggled.stats.completed, added.stats.completed + 1);
    assert_eq!(toggled.stats.xp, added.stats.xp + 10);
    assert_eq!(toggled.stats.total, added.stats.total);
    assert!(!toggled.date.is_empty());
}

#[tokio::test]
async fn http_blank_task_is_ignored() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = board(&client, &server.base_url).await;
    let after: BoardResponse = client
        .post(format!("{}/api/tasks", server.base_url))
        .json(&serde_json::json!({ "text": "   " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.tasks, before.tasks);
}

#[tokio::test]
async fn http_toggle_out_of_range_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/tasks/9999/toggle", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_form_add_shows_on_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let page = client
        .post(format!("{}/tasks", server.base_url))
        .form(&[("text", "read <chapter 3>")])
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
    let html = page.text().await.unwrap();
    assert!(html.contains("read &lt;chapter 3&gt;"));
}

#[tokio::test]
async fn http_dark_mode_toggles() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = board(&client, &server.base_url).await;
    let after: BoardResponse = client
        .post(format!("{}/api/dark-mode", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.dark_mode, !before.dark_mode);
}

#[tokio::test]
async fn http_startup_rolls_over_previous_day() {
    let _guard = TEST_LOCK.lock().await;
    let data_path = unique_data_path("rollover");
    let yesterday = (Local::now().date_naive() - ChronoDuration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let tasks = serde_json::json!([
        { "text": "a", "done": true },
        { "text": "b", "done": false },
        { "text": "c", "done": true }
    ]);
    let seeded = serde_json::json!({
        "tasks": tasks.to_string(),
        "lastOpenedDate": yesterday,
    });
    std::fs::write(&data_path, seeded.to_string()).unwrap();

    let server = spawn_server(data_path.clone()).await;
    let client = Client::new();
    let today = board(&client, &server.base_url).await;

    assert_eq!(
        today.tasks,
        vec![Task {
            text: "b".to_string(),
            done: false
        }]
    );
    drop(server);

    let stored: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&data_path).unwrap()).unwrap();
    assert_eq!(stored["lastOpenedDate"], serde_json::json!(today.date));
    let _ = std::fs::remove_file(data_path);
}
