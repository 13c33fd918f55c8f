//! Writing rendered payloads to standard output or files.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use knows_export::Payload;
use tracing::{info, instrument};

use super::commands::{CliError, ExecutionSummary};

/// Writes the payload of `summary` to its output file, or to `writer` when
/// no file was requested.
///
/// CSV written to a file produces `<stem>_nodes.csv` and `<stem>_edges.csv`
/// beside the requested path; on a stream the two tables are separated by a
/// blank line. Images and PDF documents are written as raw bytes. Returns
/// the files written.
///
/// # Errors
/// Returns [`CliError::Io`] when a file cannot be written and
/// [`CliError::Stream`] when `writer` fails.
#[instrument(name = "cli.write_output", err, skip(summary, writer), fields(format = %summary.format))]
pub fn write_output(
    summary: &ExecutionSummary,
    mut writer: impl Write,
) -> Result<Vec<PathBuf>, CliError> {
    let Some(path) = summary.output.as_deref() else {
        write_stream(&summary.payload, &mut writer).map_err(CliError::Stream)?;
        return Ok(Vec::new());
    };

    let written = match &summary.payload {
        Payload::Text(text) => {
            write_file(path, text)?;
            vec![path.to_path_buf()]
        }
        Payload::Csv { nodes, edges } => {
            let (nodes_path, edges_path) = csv_paths(path);
            write_file(&nodes_path, nodes)?;
            write_file(&edges_path, edges)?;
            vec![nodes_path, edges_path]
        }
        Payload::Binary(bytes) => {
            write_file(path, bytes)?;
            vec![path.to_path_buf()]
        }
    };
    info!(files = written.len(), "output written");
    Ok(written)
}

fn write_stream(payload: &Payload, writer: &mut impl Write) -> std::io::Result<()> {
    match payload {
        Payload::Text(text) => writeln!(writer, "{text}"),
        Payload::Csv { nodes, edges } => writeln!(writer, "{nodes}\n\n{edges}"),
        Payload::Binary(bytes) => writer.write_all(bytes),
    }
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `<dir>/<stem>_nodes.csv` and `<dir>/<stem>_edges.csv` for `path`.
pub(super) fn csv_paths(path: &Path) -> (PathBuf, PathBuf) {
    let stem = path
        .file_stem()
        .map_or_else(|| "graph".into(), |stem| stem.to_string_lossy());
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    (
        dir.join(format!("{stem}_nodes.csv")),
        dir.join(format!("{stem}_edges.csv")),
    )
}
