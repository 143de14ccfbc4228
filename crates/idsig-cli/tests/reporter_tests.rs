use super::*;
use idsig_signature::Signature;
use idsig_tree::DeclId;

fn sample_dump() -> ModuleDump {
    let class = Signature::public("org.sample", "Box", None, 0);
    let helper = Signature::file_local(Signature::public("org.sample", "", None, 0), 1);
    ModuleDump {
        module_name: Some("<main>".to_string()),
        start_index: 0,
        local_index: 1,
        entries: vec![
            DumpEntry {
                declaration: DeclId(3),
                kind: "CLASS",
                name: "Box".to_string(),
                exported: true,
                mangle: Some("kclass:org.sample.Box".to_string()),
                rendered: class.render(),
                signature: class,
            },
            DumpEntry {
                declaration: DeclId(4),
                kind: "FUN",
                name: "helper".to_string(),
                exported: false,
                mangle: Some("kfun:org.sample.#helper(){}".to_string()),
                rendered: helper.render(),
                signature: helper,
            },
        ],
        clashes: Vec::new(),
    }
}

#[test]
fn test_render_text_without_color() {
    let text = Reporter::new(false).render_text(&sample_dump());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "module <main> (start index 0, last local id 1)");
    assert!(lines[1].contains("#3"));
    assert!(lines[1].contains("CLASS"));
    assert!(lines[1].ends_with("public org.sample/Box|null[0]"));
    assert_eq!(lines[2].trim(), "kclass:org.sample.Box");
    assert!(lines[3].ends_with("private org.sample/|null[0]:1"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn test_render_text_lists_clashes() {
    let mut dump = sample_dump();
    dump.clashes.push(ClashEntry {
        signature: "org.sample/dup|1[0]".to_string(),
        first: DeclId(5),
        second: DeclId(6),
        first_mangle: "kfun:org.sample.#dup(){}".to_string(),
        second_mangle: "kfun:org.sample.#dup(){}".to_string(),
    });
    let text = Reporter::new(false).render_text(&dump);
    assert!(text.contains("clash: org.sample/dup|1[0] claimed by #5"));
}

#[test]
fn test_render_json() {
    let json = Reporter::new(false)
        .render_json(&sample_dump(), false)
        .expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["moduleName"], "<main>");
    assert_eq!(value["localIndex"], 1);
    assert_eq!(value["entries"][0]["declaration"], 3);
    assert_eq!(value["entries"][0]["rendered"], "org.sample/Box|null[0]");
    assert_eq!(value["entries"][1]["signature"]["kind"], "fileLocal");
    assert!(value["clashes"].as_array().is_some_and(Vec::is_empty));

    let pretty = Reporter::new(false)
        .render_json(&sample_dump(), true)
        .expect("json");
    assert!(pretty.contains('\n'));
}
