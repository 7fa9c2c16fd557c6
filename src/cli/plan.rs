use std::{collections::BTreeMap, error::Error, io::Read};

use ypatch::{
    api::{Recorder, ResourceKind},
    context::PatchContext,
    patch,
    resolve::KeyTable,
};

use crate::cli::PlanArgs;

pub fn handle_plan_command(args: PlanArgs) -> Result<(), Box<dyn Error>> {
    let body = if let Some(file_path) = args.file {
        load_json_file(&file_path)?
    } else {
        read_from_stdin()?
    };
    let binder = if let Some(schema_path) = args.schema {
        load_key_table(&schema_path)?
    } else {
        KeyTable::new()
    };

    let mut ctx = PatchContext::new(args.path);
    ctx.offset = args.offset;
    if args.datastore {
        ctx.resource = ResourceKind::Datastore;
    }

    let mut recorder = Recorder::new();
    patch::apply(&ctx, &body, &binder, &mut recorder).map_err(|e| {
        eprintln!("Error: {}", e);
        e
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recorder.calls)?);
    } else {
        for call in &recorder.calls {
            println!("{}", call);
        }
    }
    Ok(())
}

fn load_key_table(path: &std::path::Path) -> Result<KeyTable, Box<dyn Error>> {
    let keys: BTreeMap<String, String> = serde_json::from_value(load_json_file(path)?)?;
    Ok(KeyTable::from(keys))
}

pub(super) fn load_json_file(path: &std::path::Path) -> Result<serde_json::Value, Box<dyn Error>> {
    let data = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&data)?;
    Ok(json)
}

pub(super) fn read_from_stdin() -> Result<serde_json::Value, Box<dyn Error>> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let json: serde_json::Value = serde_json::from_str(&buffer)?;
    Ok(json)
}
