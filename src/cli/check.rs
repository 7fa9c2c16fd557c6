use std::error::Error;

use ypatch::patch::{EditOperation, PatchDocument};

use crate::cli::{
    CheckArgs,
    plan::{load_json_file, read_from_stdin},
};

pub fn handle_check_command(args: CheckArgs) -> Result<(), Box<dyn Error>> {
    let body = if let Some(file_path) = args.file {
        load_json_file(&file_path)?
    } else {
        read_from_stdin()?
    };

    let doc = PatchDocument::parse(&body).map_err(|e| {
        eprintln!("Error: {}", e);
        e
    })?;

    println!("patch-id: {}", doc.patch_id.as_deref().unwrap_or("-"));
    for (index, edit) in doc.edits.iter().enumerate() {
        let label = edit.label(index);
        match (edit.operation, &edit.point, edit.where_) {
            (EditOperation::Insert, Some(point), Some(where_)) => {
                println!("{label}: insert {} ({where_} {point})", edit.target);
            }
            _ => println!("{label}: {} {}", edit.operation, edit.target),
        }
    }
    Ok(())
}
