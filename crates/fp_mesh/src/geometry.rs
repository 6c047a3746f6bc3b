// crates/fp_mesh/src/geometry.rs

//! 四分之一圆柱块拓扑
//!
//! 截面（z = 0 层，z = length 层顶点编号 +7）：
//!
//! ```text
//!   6 (o3)
//!   |  \__
//!   |     \ 5 (o2)
//!   3 (s2)  |
//!   |   2 (d)\
//!   |   core  |
//!   0 ----- 1 (s1) --- 4 (o1)
//! ```
//!
//! 块：核心 `(0 1 2 3)`、外壳一 `(1 4 5 2)`、外壳二 `(2 5 6 3)`，
//! 外壳块局部 x1 方向为径向、x2 方向为周向。

use fp_config::MeshConfig;

use crate::error::{MeshError, MeshResult};
use crate::grading::{solve_wall_grading, WallGrading};

/// 每层截面顶点数
const LAYER: usize = 7;

/// 顶点坐标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// x 坐标
    pub x: f64,
    /// y 坐标
    pub y: f64,
    /// z 坐标
    pub z: f64,
}

impl Vertex {
    /// 创建顶点
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 到 z 轴的距离
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// 六面体块
#[derive(Debug, Clone, PartialEq)]
pub struct HexBlock {
    /// 块名称（写入字典注释）
    pub name: &'static str,
    /// 顶点编号，blockMesh 顺序
    pub vertices: [usize; 8],
    /// 三个局部方向的单元数
    pub cells: [usize; 3],
    /// 三个局部方向的 simpleGrading
    pub grading: [f64; 3],
}

impl HexBlock {
    /// 块内单元数，溢出时返回 `None`
    pub fn n_cells(&self) -> Option<usize> {
        self.cells.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n))
    }
}

/// 圆弧边
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcEdge {
    /// 起点编号
    pub from: usize,
    /// 终点编号
    pub to: usize,
    /// 弧上中间点
    pub through: Vertex,
}

/// patch 类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKind {
    /// 普通边界
    Patch,
    /// 壁面
    Wall,
    /// 对称面，具体类型由配置决定
    Symmetry,
}

/// 边界 patch
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// patch 名称
    pub name: String,
    /// patch 类别
    pub kind: PatchKind,
    /// 写入字典的类型
    pub patch_type: String,
    /// 面，顶点顺序使法向朝外
    pub faces: Vec<[usize; 4]>,
}

/// 四分之一圆柱
#[derive(Debug, Clone)]
pub struct QuarterCylinder {
    vertices: Vec<Vertex>,
    blocks: Vec<HexBlock>,
    edges: Vec<ArcEdge>,
    patches: Vec<Patch>,
    wall_grading: WallGrading,
}

impl QuarterCylinder {
    /// 按配置构建块拓扑
    ///
    /// 调用方应先执行 `MeshConfig::validate`。
    pub fn from_config(config: &MeshConfig) -> MeshResult<Self> {
        let r = config.radius;
        let length = config.length;

        let side = config.core_ratio * r;
        let diag = config.diagonal_ratio * r * std::f64::consts::FRAC_1_SQRT_2;
        let outer = r * std::f64::consts::FRAC_1_SQRT_2;

        let section = [
            (0.0, 0.0),   // 0 轴线
            (side, 0.0),  // 1 核心块 x 轴角点
            (diag, diag), // 2 核心块对角点
            (0.0, side),  // 3 核心块 y 轴角点
            (r, 0.0),     // 4 外壁 x 轴
            (outer, outer), // 5 外壁 45°
            (0.0, r),     // 6 外壁 y 轴
        ];

        let mut vertices = Vec::with_capacity(2 * LAYER);
        for z in [0.0, length] {
            vertices.extend(section.iter().map(|&(x, y)| Vertex::new(x, y, z)));
        }

        // 周向单元在两个外壳块间平分，核心块两个方向沿用同一数目
        let n_t = config.tangential_cells.div_ceil(2).max(1);
        let n_r = config.radial_cells;
        let n_z = config.axial_cells;

        let wall_grading = match config.wall_thickness {
            Some(end_size) => {
                solve_wall_grading(r * (1.0 - config.core_ratio), n_r, end_size, config.c2c_expansion)?
            }
            None => WallGrading::uniform(),
        };
        let radial = wall_grading.total_expansion;

        let hex = |bottom: [usize; 4]| -> [usize; 8] {
            [
                bottom[0],
                bottom[1],
                bottom[2],
                bottom[3],
                bottom[0] + LAYER,
                bottom[1] + LAYER,
                bottom[2] + LAYER,
                bottom[3] + LAYER,
            ]
        };

        let blocks = vec![
            HexBlock {
                name: "core",
                vertices: hex([0, 1, 2, 3]),
                cells: [n_t, n_t, n_z],
                grading: [1.0, 1.0, 1.0],
            },
            HexBlock {
                name: "shell_x",
                vertices: hex([1, 4, 5, 2]),
                cells: [n_r, n_t, n_z],
                grading: [radial, 1.0, 1.0],
            },
            HexBlock {
                name: "shell_y",
                vertices: hex([2, 5, 6, 3]),
                cells: [n_r, n_t, n_z],
                grading: [radial, 1.0, 1.0],
            },
        ];

        let arc_point = |angle: f64, z: f64| Vertex::new(r * angle.cos(), r * angle.sin(), z);
        let first = std::f64::consts::FRAC_PI_8;
        let second = 3.0 * std::f64::consts::FRAC_PI_8;
        let mut edges = Vec::with_capacity(4);
        for (level, z) in [(0, 0.0), (LAYER, length)] {
            edges.push(ArcEdge {
                from: 4 + level,
                to: 5 + level,
                through: arc_point(first, z),
            });
            edges.push(ArcEdge {
                from: 5 + level,
                to: 6 + level,
                through: arc_point(second, z),
            });
        }

        let top = |i: usize| i + LAYER;
        let patches = vec![
            Patch {
                name: config.start_patch.clone(),
                kind: PatchKind::Patch,
                patch_type: "patch".to_string(),
                faces: vec![[0, 3, 2, 1], [1, 2, 5, 4], [2, 3, 6, 5]],
            },
            Patch {
                name: config.end_patch.clone(),
                kind: PatchKind::Patch,
                patch_type: "patch".to_string(),
                faces: vec![
                    [top(0), top(1), top(2), top(3)],
                    [top(1), top(4), top(5), top(2)],
                    [top(2), top(5), top(6), top(3)],
                ],
            },
            Patch {
                name: config.wall_patch.clone(),
                kind: PatchKind::Wall,
                patch_type: "wall".to_string(),
                faces: vec![[4, 5, top(5), top(4)], [5, 6, top(6), top(5)]],
            },
            Patch {
                name: config.symmetry_patch.clone(),
                kind: PatchKind::Symmetry,
                patch_type: config.effective_symmetry_type(),
                faces: vec![
                    [0, 1, top(1), top(0)],
                    [1, 4, top(4), top(1)],
                    [3, 0, top(0), top(3)],
                    [6, 3, top(3), top(6)],
                ],
            },
        ];

        Ok(Self {
            vertices,
            blocks,
            edges,
            patches,
            wall_grading,
        })
    }

    /// 顶点
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// 块
    pub fn blocks(&self) -> &[HexBlock] {
        &self.blocks
    }

    /// 圆弧边
    pub fn edges(&self) -> &[ArcEdge] {
        &self.edges
    }

    /// 边界
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// 按名称查找 patch
    pub fn patch(&self, name: &str) -> Option<&Patch> {
        self.patches.iter().find(|p| p.name == name)
    }

    /// 径向加密
    pub fn wall_grading(&self) -> WallGrading {
        self.wall_grading
    }

    /// 总单元数
    pub fn n_cells(&self) -> MeshResult<usize> {
        self.blocks
            .iter()
            .try_fold(0usize, |acc, block| acc.checked_add(block.n_cells()?))
            .ok_or(MeshError::CellCountOverflow {
                cells: self.blocks.iter().map(|b| b.cells).collect(),
            })
    }

    /// 面的外法向（未归一化）
    pub fn face_normal(&self, face: &[usize; 4]) -> Vertex {
        let p = |i: usize| self.vertices[face[i]];
        let a = p(1);
        let b = p(3);
        let o = p(0);
        let (ux, uy, uz) = (a.x - o.x, a.y - o.y, a.z - o.z);
        let (vx, vy, vz) = (b.x - o.x, b.y - o.y, b.z - o.z);
        Vertex::new(uy * vz - uz * vy, uz * vx - ux * vz, ux * vy - uy * vx)
    }
}
