// crates/fp_config/src/mesh_config.rs

//! 四分之一圆柱网格配置
//!
//! 轴线沿 +z，截面占据 +x/+y 象限。缺省值与既有算例保持一致。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// 对称面缺省边界类型
pub const DEFAULT_SYMMETRY_TYPE: &str = "symmetry";

/// 单方向最大单元数
pub const MAX_CELLS_PER_DIRECTION: usize = 100_000;

/// 最大总单元数
pub const MAX_TOTAL_CELLS: usize = 200_000_000;

/// blockMeshDict 保留的 patch 名称（`defaultPatch` 使用）
const RESERVED_PATCH_NAME: &str = "default";

/// 能否作为字典中的单个词写出（patch 名称、类型）
pub fn is_dict_word(s: &str) -> bool {
    !s.is_empty()
        && !s
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | '{' | '}' | '(' | ')' | '"' | '/'))
}

/// 网格配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// 圆柱长度 [m]
    pub length: f64,
    /// 圆柱半径 [m]
    pub radius: f64,
    /// 轴向单元数
    pub axial_cells: usize,
    /// 径向单元数（外壳块）
    pub radial_cells: usize,
    /// 周向单元数（整个四分之一圆）
    pub tangential_cells: usize,
    /// 近壁第一层单元厚度 [m]，`None` 表示均匀分布
    pub wall_thickness: Option<f64>,
    /// 径向相邻单元最大尺寸比
    pub c2c_expansion: f64,
    /// 核心块边长与半径之比
    pub core_ratio: f64,
    /// 核心块对角点到轴线距离与半径之比
    pub diagonal_ratio: f64,
    /// 外壁 patch 名称
    pub wall_patch: String,
    /// 对称面 patch 名称
    pub symmetry_patch: String,
    /// 对称面 patch 类型
    pub symmetry_patch_type: Option<String>,
    /// 入口 patch 名称 (z = 0)
    pub start_patch: String,
    /// 出口 patch 名称 (z = length)
    pub end_patch: String,
    /// blockMeshDict 输出路径（相对算例目录）
    pub output: Option<PathBuf>,
    /// 块骨架调试 VTK 输出路径
    pub debug_vtk: Option<PathBuf>,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            length: 1.0,
            radius: 0.5,
            axial_cells: 20,
            radial_cells: 8,
            tangential_cells: 12,
            wall_thickness: None,
            c2c_expansion: 1.2,
            core_ratio: 0.62,
            diagonal_ratio: 0.7,
            wall_patch: "solidCylinder".to_string(),
            symmetry_patch: "symmetryPlane".to_string(),
            symmetry_patch_type: None,
            start_patch: "inlet".to_string(),
            end_patch: "topOutlet".to_string(),
            output: None,
            debug_vtk: None,
        }
    }
}

impl MeshConfig {
    /// 实际写入的对称面类型
    ///
    /// 未设置时为 `symmetry`；`symmetryPlane`（不区分大小写）同样折算为 `symmetry`。
    pub fn effective_symmetry_type(&self) -> String {
        match self.symmetry_patch_type.as_deref() {
            None | Some("") => DEFAULT_SYMMETRY_TYPE.to_string(),
            Some(t) if t.eq_ignore_ascii_case("symmetryplane") => DEFAULT_SYMMETRY_TYPE.to_string(),
            Some(t) => t.to_string(),
        }
    }

    /// 预计总单元数，溢出时返回 `None`
    ///
    /// 核心块 `n_t × n_t × n_z`，两个外壳块各 `n_r × n_t × n_z`，`n_t = ceil(tangential / 2)`。
    pub fn estimated_cells(&self) -> Option<usize> {
        let n_t = self.tangential_cells.div_ceil(2).max(1);
        let layer = n_t
            .checked_mul(n_t)?
            .checked_add(self.radial_cells.checked_mul(n_t)?.checked_mul(2)?)?;
        layer.checked_mul(self.axial_cells)
    }

    /// 外壳块最短径向跨度 [m]
    pub fn shell_span(&self) -> f64 {
        self.radius * (1.0 - self.diagonal_ratio.max(self.core_ratio))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.length > 0.0) {
            return Err(ConfigError::invalid("mesh.length", self.length, "must be positive"));
        }
        if !(self.radius > 0.0) {
            return Err(ConfigError::invalid("mesh.radius", self.radius, "must be positive"));
        }

        for (key, count) in [
            ("mesh.axial_cells", self.axial_cells),
            ("mesh.radial_cells", self.radial_cells),
            ("mesh.tangential_cells", self.tangential_cells),
        ] {
            if count == 0 {
                return Err(ConfigError::invalid(key, count, "needs at least one cell"));
            }
            if count > MAX_CELLS_PER_DIRECTION {
                return Err(ConfigError::invalid(
                    key,
                    count,
                    &format!("exceeds the limit of {} cells", MAX_CELLS_PER_DIRECTION),
                ));
            }
        }

        match self.estimated_cells() {
            Some(total) if total <= MAX_TOTAL_CELLS => {}
            total => {
                return Err(ConfigError::invalid(
                    "mesh.*_cells",
                    total.map_or_else(|| "overflow".to_string(), |n| n.to_string()),
                    &format!("total cell count exceeds {}", MAX_TOTAL_CELLS),
                ));
            }
        }

        if !(self.core_ratio > 0.0 && self.core_ratio < 1.0) {
            return Err(ConfigError::invalid("mesh.core_ratio", self.core_ratio, "must lie in (0, 1)"));
        }
        if !(self.diagonal_ratio > 0.0 && self.diagonal_ratio < 1.0) {
            return Err(ConfigError::invalid(
                "mesh.diagonal_ratio",
                self.diagonal_ratio,
                "must lie in (0, 1)",
            ));
        }
        // 对角点必须落在核心正方形斜边之外，否则核心块退化
        if self.diagonal_ratio * std::f64::consts::SQRT_2 <= self.core_ratio {
            return Err(ConfigError::invalid(
                "mesh.diagonal_ratio",
                self.diagonal_ratio,
                "core block would be concave",
            ));
        }

        if !(self.c2c_expansion >= 1.0) {
            return Err(ConfigError::invalid(
                "mesh.c2c_expansion",
                self.c2c_expansion,
                "must be at least 1.0",
            ));
        }

        if let Some(t) = self.wall_thickness {
            if !(t > 0.0) {
                return Err(ConfigError::invalid("mesh.wall_thickness", t, "must be positive"));
            }
            if t >= self.shell_span() {
                return Err(ConfigError::invalid(
                    "mesh.wall_thickness",
                    t,
                    "must be smaller than the radial span of the shell blocks",
                ));
            }
        }

        for (key, name) in [
            ("mesh.wall_patch", &self.wall_patch),
            ("mesh.symmetry_patch", &self.symmetry_patch),
            ("mesh.start_patch", &self.start_patch),
            ("mesh.end_patch", &self.end_patch),
        ] {
            if !is_dict_word(name) {
                return Err(ConfigError::invalid(key, name, "patch names must be non-empty words"));
            }
            if name == RESERVED_PATCH_NAME {
                return Err(ConfigError::invalid(key, name, "reserved for defaultPatch"));
            }
        }

        if let Some(t) = &self.symmetry_patch_type {
            if !is_dict_word(t) {
                return Err(ConfigError::invalid(
                    "mesh.symmetry_patch_type",
                    t,
                    "patch types must be non-empty words",
                ));
            }
        }

        let mut names = vec![
            &self.wall_patch,
            &self.symmetry_patch,
            &self.start_patch,
            &self.end_patch,
        ];
        names.sort();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ConfigError::invalid("mesh.*_patch", pair[0], "patch names must be distinct"));
        }

        Ok(())
    }
}
