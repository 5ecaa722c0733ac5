use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const DEFAULT_CATALOG: &str = "\
Title,Subtitle,Author 1,Author 2,Author 3,Author 4,Author 5,Type,Format,Topic,Publisher,Year,Free Download
Clean Code,A Handbook of Agile Software Craftsmanship,Robert Martin,,,,,Book,Physical,Software,Prentice Hall,2008,no
The Pragmatic Programmer,,Andrew Hunt,David Thomas,,,,Book,PDF,Software,Addison-Wesley,1999.0,yes
Deep Work,,Cal Newport,,,,,Book,Physical,Productivity,Grand Central,2016,
";

pub struct TestEnv {
    _tmp: TempDir,
    pub source: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_catalog("library.csv", DEFAULT_CATALOG)
    }

    pub fn with_catalog(name: &str, body: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let source = tmp.path().join(name);
        fs::write(&source, body).expect("write catalog fixture");
        Self { _tmp: tmp, source }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("librarium").expect("librarium binary");
        cmd.arg("--source").arg(&self.source);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}
