//! Build command integration tests.

use predicates::prelude::*;

use super::common::{FAKE_GO, FAKE_ISCC, TestEnv, dir_listing, tarball_entries};

#[test]
fn win_agent_delivers_tarball() {
  let env = TestEnv::new();
  let go = env.write_script("go", FAKE_GO);
  let dest = env.dest_path();

  env
    .crossbuild_cmd()
    .env("CROSSBUILD_GO", &go)
    .arg("win-agent")
    .arg(env.source_tarball())
    .arg("--dest-dir")
    .arg(&dest)
    .assert()
    .success()
    .stdout(predicate::str::contains("Built win-agent 1.2.3"))
    .stdout(predicate::str::contains("Size"))
    .stdout(predicate::str::contains("SHA256"));

  assert_eq!(dir_listing(&dest), vec!["juju-1.2.3-win2012-amd64.tgz"]);
  assert_eq!(
    tarball_entries(&dest.join("juju-1.2.3-win2012-amd64.tgz")),
    vec!["jujud.exe"]
  );
  assert!(dir_listing(&env.scratch_path()).is_empty());
}

#[test]
fn win_client_delivers_installer() {
  let env = TestEnv::new();
  let go = env.write_script("go", FAKE_GO);
  let iscc = env.write_script("iscc", FAKE_ISCC);
  let config = env.write_config(&iscc);
  let dest = env.dest_path();

  env
    .crossbuild_cmd()
    .env("CROSSBUILD_GO", &go)
    .arg("--config")
    .arg(&config)
    .arg("win-client")
    .arg(env.source_tarball())
    .arg("-o")
    .arg(&dest)
    .assert()
    .success()
    .stdout(predicate::str::contains("Built win-client 1.2.3"));

  assert_eq!(dir_listing(&dest), vec!["juju-setup-1.2.3.exe"]);
  assert!(dir_listing(&env.scratch_path()).is_empty());
}

#[test]
fn package_defaults_to_current_directory() {
  let env = TestEnv::new();
  let go = env.write_script("go", FAKE_GO);
  let tarball = env.source_tarball();
  let dest = env.dest_path();

  env
    .crossbuild_cmd()
    .current_dir(&dest)
    .env("CROSSBUILD_GO", &go)
    .arg("win-agent")
    .arg(&tarball)
    .assert()
    .success();

  assert_eq!(dir_listing(&dest), vec!["juju-1.2.3-win2012-amd64.tgz"]);
}

#[test]
fn compile_failure_exits_2_and_leaves_dest_unchanged() {
  let env = TestEnv::new();
  let go = env.write_script("go", "#!/bin/sh\necho \"can't load package: $2\" >&2\nexit 1\n");
  let dest = env.dest_path();

  env
    .crossbuild_cmd()
    .env("CROSSBUILD_GO", &go)
    .arg("win-agent")
    .arg(env.source_tarball())
    .arg("--dest-dir")
    .arg(&dest)
    .assert()
    .code(2)
    .stderr(predicate::str::contains("can't load package"));

  assert!(dir_listing(&dest).is_empty());
  assert!(dir_listing(&env.scratch_path()).is_empty());
}

#[test]
fn dry_run_never_invokes_tools() {
  let env = TestEnv::new();
  let marker = env.temp.path().join("go-was-run");
  let go = env.write_script("go", &format!("#!/bin/sh\ntouch '{}'\n", marker.display()));
  let dest = env.dest_path();

  env
    .crossbuild_cmd()
    .env("CROSSBUILD_GO", &go)
    .arg("--dry-run")
    .arg("win-client")
    .arg(env.source_tarball())
    .arg("--dest-dir")
    .arg(&dest)
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run: win-client 1.2.3 not built"))
    .stdout(predicate::str::contains("Would write"))
    .stdout(predicate::str::contains("juju-setup-1.2.3.exe"))
    .stdout(predicate::str::contains("SHA256").not());

  assert!(!marker.exists());
  assert!(dir_listing(&dest).is_empty());
  assert!(dir_listing(&env.scratch_path()).is_empty());
}

#[test]
fn osx_client_packaging_is_not_implemented() {
  let env = TestEnv::new();
  let go = env.write_script("go", FAKE_GO);
  let dest = env.dest_path();

  env
    .crossbuild_cmd()
    .env("CROSSBUILD_GO", &go)
    .arg("osx-client")
    .arg(env.source_tarball())
    .arg("--dest-dir")
    .arg(&dest)
    .assert()
    .code(2)
    .stderr(predicate::str::contains("not implemented"));

  assert!(dir_listing(&dest).is_empty());
}

#[test]
fn json_report_describes_output() {
  let env = TestEnv::new();
  let go = env.write_script("go", FAKE_GO);
  let dest = env.dest_path();

  let assert = env
    .crossbuild_cmd()
    .env("CROSSBUILD_GO", &go)
    .arg("win-agent")
    .arg(env.source_tarball())
    .arg("--dest-dir")
    .arg(&dest)
    .arg("--format")
    .arg("json")
    .assert()
    .success();

  let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
  assert_eq!(report["target"], "win-agent");
  assert_eq!(report["version"], "1.2.3");
  assert_eq!(report["dry_run"], false);
  assert_eq!(report["output"]["sha256"].as_str().map(str::len), Some(64));
}

#[test]
fn verbose_prints_done_and_failure_chain() {
  let env = TestEnv::new();
  let go = env.write_script("go", FAKE_GO);

  env
    .crossbuild_cmd()
    .env("CROSSBUILD_GO", &go)
    .arg("-v")
    .arg("win-agent")
    .arg(env.source_tarball())
    .arg("--dest-dir")
    .arg(env.dest_path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Done."));

  let bogus = env.temp.path().join("juju-core_1.2.3.tar.gz");
  std::fs::write(&bogus, "not gzip").unwrap();

  env
    .crossbuild_cmd()
    .arg("-v")
    .arg("win-agent")
    .arg(&bogus)
    .assert()
    .code(2)
    .stderr(predicate::str::contains("Caused by"));
}
