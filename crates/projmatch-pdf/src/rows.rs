use projmatch_core::{PageContent, TextBlock};

use crate::config::TableParsingConfig;
use crate::tables::TableRow;
use crate::text_processing::{expand_ligatures, fix_hyphenation, normalize_ws};

/// Reconstruct table rows from a page's positioned blocks.
///
/// Blocks whose top edges sit within `row_gap_threshold` of each other form
/// one row; within a row, blocks are ordered left to right and merged into a
/// single cell when the horizontal gap between them is below
/// `cell_gap_threshold`. Cell text is ligature-expanded, de-hyphenated, and
/// whitespace-normalized.
pub fn reconstruct_rows(page: &PageContent, config: &TableParsingConfig) -> Vec<TableRow> {
    let mut blocks: Vec<&TextBlock> = page
        .blocks
        .iter()
        .filter(|b| !b.text.trim().is_empty())
        .collect();
    if blocks.is_empty() {
        return Vec::new();
    }

    blocks.sort_by(|a, b| {
        a.y0.partial_cmp(&b.y0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal))
    });

    // Cluster by top edge
    let mut clusters: Vec<Vec<&TextBlock>> = Vec::new();
    let mut current: Vec<&TextBlock> = vec![blocks[0]];
    let mut row_top = blocks[0].y0;
    for block in blocks.into_iter().skip(1) {
        if (block.y0 - row_top).abs() <= config.row_gap_threshold {
            current.push(block);
        } else {
            clusters.push(std::mem::take(&mut current));
            current.push(block);
            row_top = block.y0;
        }
    }
    clusters.push(current);

    clusters
        .into_iter()
        .map(|cluster| cluster_to_cells(cluster, config.cell_gap_threshold))
        .collect()
}

fn cluster_to_cells(mut cluster: Vec<&TextBlock>, cell_gap: f32) -> TableRow {
    cluster.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal));

    let mut cells: Vec<String> = Vec::new();
    let mut prev_right: Option<f32> = None;
    for block in cluster {
        let joined = match (prev_right, cells.last_mut()) {
            (Some(right), Some(last)) if block.x0 - right < cell_gap => {
                last.push(' ');
                last.push_str(&block.text);
                true
            }
            _ => false,
        };
        if !joined {
            cells.push(block.text.clone());
        }
        prev_right = Some(block.x1.max(prev_right.unwrap_or(f32::MIN)));
    }

    cells
        .into_iter()
        .map(|c| normalize_ws(&fix_hyphenation(&expand_ligatures(&c))))
        .collect()
}
