use std::fs;
use std::path::Path;

use varscan::{Analyzer, Config, Reporter};

fn scan_config(base: &Path) -> Config {
    Config {
        base_directory: base.to_path_buf(),
        ..Config::default()
    }
}

fn build_tree(base: &Path) {
    let include = base.join("src/include");
    let module = base.join("src/mod");
    fs::create_dir_all(&include).unwrap();
    fs::create_dir_all(&module).unwrap();

    fs::write(
        include.join("defs.h"),
        "#define MY_VAR \"bar\"\n#define CHAINED OTHER_SYM\n",
    )
    .unwrap();

    fs::write(
        module.join("mod.c"),
        concat!(
            "switch_channel_set_variable(chan, \"foo\", val);\n",
            "switch_channel_get_variable(chan, MY_VAR);\n",
            "switch_channel_get_variable(chan, UNKNOWN_SYM);\n",
            "switch_channel_set_variable(chan, \"foo\", val);\n",
            "switch_channel_var_true(chan, CHAINED);\n",
        ),
    )
    .unwrap();
}

#[test]
fn full_pipeline_indexes_literals_and_substitutions() {
    let tmp = tempfile::tempdir().unwrap();
    build_tree(tmp.path());

    let analyzer = Analyzer::new(scan_config(tmp.path()));
    let analysis = analyzer.analyze().unwrap();

    // Direct literal, referenced twice: two distinct locations accumulate.
    let foo = analysis.index.get("foo").unwrap();
    assert_eq!(foo.sources.len(), 2);
    assert_eq!(foo.sources[0].path, "src/mod");
    assert_eq!(foo.sources[0].filename, "mod.c");
    assert_eq!(foo.sources[0].line, 1);
    assert_eq!(foo.sources[1].line, 4);

    // Symbolic reference resolved through the constant table.
    let bar = analysis.index.get("bar").unwrap();
    assert_eq!(bar.sources.len(), 1);
    assert_eq!(bar.sources[0].line, 2);

    // No matching define, and a constant chained to another constant:
    // both diverted to review, with the post-substitution token.
    assert_eq!(analysis.needs_review.len(), 2);
    assert_eq!(analysis.needs_review[0].line, 3);
    assert_eq!(analysis.needs_review[0].token, "UNKNOWN_SYM");
    assert_eq!(analysis.needs_review[1].line, 5);
    assert_eq!(analysis.needs_review[1].token, "OTHER_SYM");

    // Every raw reference lands in exactly one of index or review.
    let indexed: usize = analysis
        .index
        .sorted_entries()
        .iter()
        .map(|v| v.sources.len())
        .sum();
    assert_eq!(indexed + analysis.needs_review.len(), analysis.references.len());

    // Indexed names carry no quote characters.
    assert!(analysis
        .index
        .sorted_entries()
        .iter()
        .all(|v| !v.name.contains('"')));
}

#[test]
fn exported_document_is_sorted_and_shaped() {
    let tmp = tempfile::tempdir().unwrap();
    let module = tmp.path().join("src/mod");
    fs::create_dir_all(&module).unwrap();
    fs::write(
        module.join("mod.c"),
        concat!(
            "switch_channel_get_variable(chan, \"zoo\");\n",
            "switch_channel_get_variable(chan, \"apple\");\n",
            "switch_channel_get_variable(chan, \"Bar\");\n",
        ),
    )
    .unwrap();

    let analyzer = Analyzer::new(scan_config(tmp.path()));
    let analysis = analyzer.analyze().unwrap();

    let out = tmp.path().join("variables.json");
    let reporter = Reporter::new();
    reporter.export_json(&analysis, "v1.2.3", &out).unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();

    assert_eq!(document["version"], "v1.2.3");

    let names: Vec<&str> = document["variables"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["apple", "Bar", "zoo"]);

    let source = &document["variables"][0]["sources"][0];
    assert_eq!(source["path"], "src/mod");
    assert_eq!(source["filename"], "mod.c");
    assert_eq!(source["line"], 2);
}

#[test]
fn repeated_runs_are_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    build_tree(tmp.path());

    let analyzer = Analyzer::new(scan_config(tmp.path()));
    let first = analyzer.analyze().unwrap();
    let second = analyzer.analyze().unwrap();

    let first_entries: Vec<_> = first.index.sorted_entries().into_iter().cloned().collect();
    let second_entries: Vec<_> = second.index.sorted_entries().into_iter().cloned().collect();
    assert_eq!(first_entries, second_entries);
    assert_eq!(first.needs_review, second.needs_review);

    // Exporting the same state twice is byte-identical.
    let reporter = Reporter::new();
    let out_a = tmp.path().join("a.json");
    let out_b = tmp.path().join("b.json");
    reporter.export_json(&first, "", &out_a).unwrap();
    reporter.export_json(&first, "", &out_b).unwrap();
    assert_eq!(
        fs::read(&out_a).unwrap(),
        fs::read(&out_b).unwrap()
    );
}

#[test]
fn scan_set_can_span_multiple_roots() {
    let tmp = tempfile::tempdir().unwrap();
    build_tree(tmp.path());

    // A second root contributing its own definition and reference.
    let extra = tmp.path().join("libs/channel");
    fs::create_dir_all(&extra).unwrap();
    fs::write(extra.join("channel.h"), "#define EXTRA_VAR \"extra\"\n").unwrap();
    fs::write(
        extra.join("channel.c"),
        "switch_channel_set_variable(chan, EXTRA_VAR, v);\n",
    )
    .unwrap();

    let mut config = scan_config(tmp.path());
    config.scan_directories = vec!["src".to_string(), "libs".to_string()];

    let analyzer = Analyzer::new(config);
    let analysis = analyzer.analyze().unwrap();

    let extra_var = analysis.index.get("extra").unwrap();
    assert_eq!(extra_var.sources[0].path, "libs/channel");
    assert_eq!(extra_var.sources[0].filename, "channel.c");
}
