pub mod mock_asr;
pub mod mock_tts;

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use std::{fs, thread};
use tempfile::TempDir;

/// A `vocalis serve` process isolated in its own temp dirs
pub struct TestContext {
    pub temp_dir: TempDir,
    pub child: Child,
    pub socket_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let bin_path = env!("CARGO_BIN_EXE_vocalis");

        // Config and database land inside the temp dir
        let config_dir = temp_dir.path().join("config");
        let data_dir = temp_dir.path().join("data");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        let socket_path = temp_dir.path().join("vocalis.sock");

        let child = Command::new(bin_path)
            .arg("serve")
            .arg("--socket")
            .arg(&socket_path)
            .env("XDG_CONFIG_HOME", &config_dir)
            .env("XDG_DATA_HOME", &data_dir)
            .env_remove("VOCALIS_DATABASE_PATH")
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .expect("Failed to spawn vocalis server");

        let ctx = TestContext {
            temp_dir,
            child,
            socket_path,
        };

        ctx.wait_for_socket();
        ctx
    }

    fn wait_for_socket(&self) {
        let start = std::time::Instant::now();
        while start.elapsed() < Duration::from_secs(10) {
            if self.socket_path.exists() {
                return;
            }
            thread::sleep(Duration::from_millis(100));
        }
        panic!("Timed out waiting for socket at {:?}", self.socket_path);
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
