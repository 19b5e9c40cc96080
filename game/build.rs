use std::env;
use std::fs;
use std::path::Path;

fn main() {
    embed_stages();
}

fn collect_stages(dir: &Path, stages: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "csv")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            let json_path = path.with_extension("json");
            println!("cargo:rerun-if-changed={}", path.display());
            if !json_path.exists() {
                // A layout without metadata has no walls or blocks to play with.
                println!("cargo:warning=skipping stage {} (no .json)", path.display());
                continue;
            }
            println!("cargo:rerun-if-changed={}", json_path.display());
            stages.push(stem.to_string());
        }
    }
}

fn embed_stages() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("stages.rs");

    let stages_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../stages");

    println!("cargo:rerun-if-changed={}", stages_dir.display());

    let mut stages: Vec<String> = Vec::new();
    collect_stages(&stages_dir, &mut stages);

    // Stage order is play order, so file names carry a numeric prefix.
    stages.sort();

    let mut code = String::new();
    code.push_str("pub(crate) static STAGE_DATA: &[(&str, &str, &str)] = &[\n");

    for name in &stages {
        let rel_csv = format!("../stages/{}.csv", name);
        let rel_json = format!("../stages/{}.json", name);

        code.push_str(&format!(
            "    ({:?}, include_str!(concat!(env!(\"CARGO_MANIFEST_DIR\"), \"/{rel_csv}\")), include_str!(concat!(env!(\"CARGO_MANIFEST_DIR\"), \"/{rel_json}\"))),\n",
            name
        ));
    }

    code.push_str("];\n");

    // Only write if content changed to avoid unnecessary recompilation
    let should_write = match fs::read_to_string(&dest_path) {
        Ok(existing) => existing != code,
        Err(_) => true,
    };
    if should_write {
        fs::write(&dest_path, code).unwrap();
    }
}
