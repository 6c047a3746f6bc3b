// crates/fp_mesh/src/vtk.rs

//! 块骨架调试输出（legacy VTK，ASCII）
//!
//! 每个块写成一个 VTK_HEXAHEDRON，圆弧边不参与，仅用于检查拓扑与编号。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::dict::fmt_scalar;
use crate::error::MeshResult;
use crate::geometry::QuarterCylinder;

/// VTK 六面体单元类型
const VTK_HEXAHEDRON: u8 = 12;

/// 写出块骨架
pub fn write_debug_vtk(geometry: &QuarterCylinder, path: &Path) -> MeshResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    write_debug_vtk_to(geometry, &mut w)?;
    w.flush()?;
    Ok(())
}

/// 写出块骨架到任意 writer
pub fn write_debug_vtk_to<W: Write>(geometry: &QuarterCylinder, w: &mut W) -> MeshResult<()> {
    let vertices = geometry.vertices();
    let blocks = geometry.blocks();

    writeln!(w, "# vtk DataFile Version 3.0")?;
    writeln!(w, "FoamPrep block skeleton")?;
    writeln!(w, "ASCII")?;
    writeln!(w, "DATASET UNSTRUCTURED_GRID")?;

    writeln!(w, "POINTS {} double", vertices.len())?;
    for v in vertices {
        writeln!(w, "{} {} {}", fmt_scalar(v.x), fmt_scalar(v.y), fmt_scalar(v.z))?;
    }

    writeln!(w, "CELLS {} {}", blocks.len(), blocks.len() * 9)?;
    for block in blocks {
        let ids: Vec<String> = block.vertices.iter().map(|i| i.to_string()).collect();
        writeln!(w, "8 {}", ids.join(" "))?;
    }

    writeln!(w, "CELL_TYPES {}", blocks.len())?;
    for _ in blocks {
        writeln!(w, "{}", VTK_HEXAHEDRON)?;
    }

    writeln!(w, "CELL_DATA {}", blocks.len())?;
    writeln!(w, "SCALARS block_id int 1")?;
    writeln!(w, "LOOKUP_TABLE default")?;
    for i in 0..blocks.len() {
        writeln!(w, "{}", i)?;
    }

    Ok(())
}
