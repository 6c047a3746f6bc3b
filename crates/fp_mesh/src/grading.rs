// crates/fp_mesh/src/grading.rs

//! 近壁径向加密
//!
//! 外壳块沿径向由内向外排布 `n` 个单元，相邻单元尺寸比为 `r`，
//! 最外层（贴壁）单元厚度为 `e`：
//!
//! ```text
//! e * (1 + 1/r + 1/r² + ... + 1/r^(n-1)) = L
//! ```
//!
//! 求得 `r` 后写入 blockMesh 的 `simpleGrading` 为总扩展比 `r^(n-1)`。

use crate::error::{MeshError, MeshResult};

const RATIO_SEARCH_BOUND: f64 = 1.0e3;
const BISECTION_ITERATIONS: usize = 200;

/// 径向加密结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallGrading {
    /// 相邻单元尺寸比（外/内）
    pub c2c_ratio: f64,
    /// 总扩展比（最后一个单元 / 第一个单元）
    pub total_expansion: f64,
    /// 是否被 `max_c2c` 截断
    pub clamped: bool,
}

impl WallGrading {
    /// 均匀分布
    pub fn uniform() -> Self {
        Self {
            c2c_ratio: 1.0,
            total_expansion: 1.0,
            clamped: false,
        }
    }
}

/// 末端单元厚度为 `end_size` 时 `count` 个单元的累计长度
///
/// 等比数列和 `(q^n - 1) / (q - 1)`，`q = 1/ratio`，用 `expm1` 保证 `ratio ≈ 1` 时的精度。
fn graded_length(end_size: f64, count: usize, ratio: f64) -> f64 {
    let x = -ratio.ln();
    let n = count as f64;
    let sum = if x == 0.0 {
        n
    } else {
        (n * x).exp_m1() / x.exp_m1()
    };
    end_size * sum
}

/// 求解近壁加密比
///
/// `max_c2c >= 1` 限制相邻单元尺寸比落在 `[1/max_c2c, max_c2c]` 内。
pub fn solve_wall_grading(
    length: f64,
    count: usize,
    end_size: f64,
    max_c2c: f64,
) -> MeshResult<WallGrading> {
    let fail = |reason: &str| MeshError::Grading {
        length,
        count,
        end_size,
        reason: reason.to_string(),
    };

    if !(length > 0.0) || !(end_size > 0.0) {
        return Err(fail("length and end size must be positive"));
    }
    if end_size >= length {
        return Err(fail("end size exceeds the edge length"));
    }
    if count <= 1 {
        return Ok(WallGrading::uniform());
    }

    // graded_length 随 ratio 单调递减，在对数空间二分
    let mut lo = -RATIO_SEARCH_BOUND.ln();
    let mut hi = RATIO_SEARCH_BOUND.ln();
    let ratio = if graded_length(end_size, count, lo.exp()) < length {
        lo.exp()
    } else if graded_length(end_size, count, hi.exp()) > length {
        hi.exp()
    } else {
        for _ in 0..BISECTION_ITERATIONS {
            let mid = 0.5 * (lo + hi);
            if graded_length(end_size, count, mid.exp()) > length {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        (0.5 * (lo + hi)).exp()
    };

    let limit = max_c2c.max(1.0);
    let clamped_ratio = ratio.clamp(1.0 / limit, limit);
    let clamped = (clamped_ratio - ratio).abs() > 1e-12;
    if clamped {
        tracing::warn!(
            "Radial c2c ratio {:.4} clamped to {:.4}; wall cell will differ from {}",
            ratio,
            clamped_ratio,
            end_size
        );
    }

    Ok(WallGrading {
        c2c_ratio: clamped_ratio,
        total_expansion: clamped_ratio.powf((count - 1) as f64),
        clamped,
    })
}
