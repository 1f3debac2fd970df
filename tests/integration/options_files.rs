use shadow_query::{load_from_path, ConfigError, Depth};
use std::io::Write;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut temp = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tempfile");
    temp.write_all(contents.as_bytes()).expect("write temp");
    temp.flush().expect("flush temp");
    temp
}

#[test]
fn loads_depth_from_query_table() {
    let temp = write_temp("[query]\ndepth = 3\n");
    let options = load_from_path(temp.path()).expect("load options");
    assert_eq!(options.depth, Depth::limited(3).unwrap());
}

#[test]
fn loads_unbounded_keyword() {
    let temp = write_temp("depth = \"unbounded\"\n");
    let options = load_from_path(temp.path()).expect("load options");
    assert!(options.depth.is_unbounded());
}

#[test]
fn parse_errors_carry_the_file_path() {
    let temp = write_temp("depth = 0\n");
    let err = load_from_path(temp.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Toml { path: Some(_), .. }));
    assert!(err.to_string().contains(&temp.path().display().to_string()));
    assert!(err.to_string().contains("at least 1"));
}

#[test]
fn conflicts_carry_the_file_path() {
    let temp = write_temp("depth = 1\n\n[query]\ndepth = 1\n");
    let err = load_from_path(temp.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Conflict { path: Some(_) }));
}
