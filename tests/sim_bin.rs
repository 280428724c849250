use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim", "--", "1", "2"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    let games = v["games"].as_array().expect("games array");
    assert_eq!(games.len(), 10);
    for game in games {
        assert!(game["game"].is_string());
        assert!(game["interactions"].as_u64().unwrap_or(0) > 0);
        // Random chess can shuffle kings forever; every other game must finish.
        if game["game"] != "chess" {
            assert!(game["winner"].is_string(), "unfinished game: {}", game);
        }
    }
}
