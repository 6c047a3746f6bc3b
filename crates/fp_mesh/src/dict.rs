// crates/fp_mesh/src/dict.rs

//! blockMeshDict 写出
//!
//! 输出 ASCII OpenFOAM 字典，patch 名称独占一行，便于 [`crate::patch_type`] 后续改写。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::MeshResult;
use crate::geometry::{QuarterCylinder, Vertex};

const BANNER: &str = "\
/*--------------------------------*- C++ -*----------------------------------*\\
  =========                 |
  \\\\      /  F ield         | Generated by FoamPrep
   \\\\    /   O peration     |
    \\\\  /    A nd           |
     \\\\/     M anipulation  |
\\*---------------------------------------------------------------------------*/";

const SEPARATOR: &str =
    "// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * //";

/// 默认 patch 名称与类型
const DEFAULT_PATCH_NAME: &str = "default";
const DEFAULT_PATCH_TYPE: &str = "wall";

/// 数值格式：10 位小数后去掉多余的零
pub(crate) fn fmt_scalar(value: f64) -> String {
    let s = format!("{:.10}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn fmt_vertex(v: &Vertex) -> String {
    format!("({} {} {})", fmt_scalar(v.x), fmt_scalar(v.y), fmt_scalar(v.z))
}

fn fmt_indices(indices: &[usize]) -> String {
    let parts: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
    format!("({})", parts.join(" "))
}

/// blockMeshDict 写出器
#[derive(Debug, Clone, Copy)]
pub struct BlockMeshDict<'a> {
    geometry: &'a QuarterCylinder,
    scale: f64,
}

impl<'a> BlockMeshDict<'a> {
    /// 创建写出器
    pub fn new(geometry: &'a QuarterCylinder) -> Self {
        Self {
            geometry,
            scale: 1.0,
        }
    }

    /// 设置 `scale` 条目
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// 写出到文件，自动创建父目录
    pub fn write(&self, path: &Path) -> MeshResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// 渲染为字符串
    pub fn render(&self) -> MeshResult<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// 写出到任意 writer
    pub fn write_to<W: Write>(&self, w: &mut W) -> MeshResult<()> {
        let g = self.geometry;

        writeln!(w, "{}", BANNER)?;
        writeln!(w, "FoamFile")?;
        writeln!(w, "{{")?;
        writeln!(w, "    version     2.0;")?;
        writeln!(w, "    format      ascii;")?;
        writeln!(w, "    class       dictionary;")?;
        writeln!(w, "    object      blockMeshDict;")?;
        writeln!(w, "}}")?;
        writeln!(w, "{}", SEPARATOR)?;
        writeln!(w)?;
        writeln!(w, "scale   {};", fmt_scalar(self.scale))?;
        writeln!(w)?;

        writeln!(w, "vertices")?;
        writeln!(w, "(")?;
        for (i, v) in g.vertices().iter().enumerate() {
            writeln!(w, "    {} // {}", fmt_vertex(v), i)?;
        }
        writeln!(w, ");")?;
        writeln!(w)?;

        writeln!(w, "blocks")?;
        writeln!(w, "(")?;
        for block in g.blocks() {
            let grading: Vec<String> = block.grading.iter().map(|&x| fmt_scalar(x)).collect();
            writeln!(
                w,
                "    hex {} {} simpleGrading ({}) // {}",
                fmt_indices(&block.vertices),
                fmt_indices(&block.cells),
                grading.join(" "),
                block.name
            )?;
        }
        writeln!(w, ");")?;
        writeln!(w)?;

        writeln!(w, "edges")?;
        writeln!(w, "(")?;
        for edge in g.edges() {
            writeln!(w, "    arc {} {} {}", edge.from, edge.to, fmt_vertex(&edge.through))?;
        }
        writeln!(w, ");")?;
        writeln!(w)?;

        writeln!(w, "boundary")?;
        writeln!(w, "(")?;
        for patch in g.patches() {
            writeln!(w, "    {}", patch.name)?;
            writeln!(w, "    {{")?;
            writeln!(w, "        type {};", patch.patch_type)?;
            writeln!(w, "        faces")?;
            writeln!(w, "        (")?;
            for face in &patch.faces {
                writeln!(w, "            {}", fmt_indices(face))?;
            }
            writeln!(w, "        );")?;
            writeln!(w, "    }}")?;
        }
        writeln!(w, ");")?;
        writeln!(w)?;

        writeln!(w, "defaultPatch")?;
        writeln!(w, "{{")?;
        writeln!(w, "    name {};", DEFAULT_PATCH_NAME)?;
        writeln!(w, "    type {};", DEFAULT_PATCH_TYPE)?;
        writeln!(w, "}}")?;
        writeln!(w)?;

        writeln!(w, "mergePatchPairs")?;
        writeln!(w, "(")?;
        writeln!(w, ");")?;
        writeln!(w)?;
        writeln!(
            w,
            "// ************************************************************************* //"
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_config::MeshConfig;

    #[test]
    fn test_fmt_scalar() {
        assert_eq!(fmt_scalar(1.0), "1");
        assert_eq!(fmt_scalar(0.5), "0.5");
        assert_eq!(fmt_scalar(-0.0), "0");
        assert_eq!(fmt_scalar(0.62 * 0.5), "0.31");
        assert_eq!(fmt_scalar(-2.25), "-2.25");
    }

    #[test]
    fn test_render_sections() {
        let cyl = QuarterCylinder::from_config(&MeshConfig::default()).unwrap();
        let text = BlockMeshDict::new(&cyl).render().unwrap();

        assert!(text.contains("object      blockMeshDict;"));
        assert!(text.contains("hex (0 1 2 3 7 8 9 10) (6 6 20) simpleGrading (1 1 1) // core"));
        assert!(text.contains("arc 4 5 "));
        assert!(text.contains("    inlet\n    {\n        type patch;"));
        assert!(text.contains("    solidCylinder\n    {\n        type wall;"));
        assert!(text.contains("    symmetryPlane\n    {\n        type symmetry;"));
        assert!(text.contains("    name default;"));
        assert!(text.contains("mergePatchPairs"));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system").join("blockMeshDict");
        let cyl = QuarterCylinder::from_config(&MeshConfig::default()).unwrap();

        BlockMeshDict::new(&cyl).with_scale(0.001).write(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("scale   0.001;"));
    }
}
