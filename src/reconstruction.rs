//! Piecewise-constant interface reconstruction.
//!
//! For each interface between adjacent cells, the left/right states are
//! the unmodified cell-centered values of the two neighbors (first
//! order, no slope limiting). Four shifted views cover the vertical (x)
//! and horizontal (y) interfaces at once; each view is one cell
//! narrower than the field in both directions, so the left/right pairs
//! line up index-for-index.

use ndarray::{s, ArrayView2, ArrayView3, ArrayViewD, Axis, Slice};

use crate::error::SolverError;

/// Left/right views straddling the vertical (x) and horizontal (y)
/// cell interfaces of a field.
#[derive(Debug)]
pub struct InterfaceViews<V> {
    /// Cell on the low-x side of each vertical interface
    pub x_left: V,
    /// Cell on the high-x side of each vertical interface
    pub x_right: V,
    /// Cell on the low-y side of each horizontal interface
    pub y_left: V,
    /// Cell on the high-y side of each horizontal interface
    pub y_right: V,
}

/// Interface views of a 2D field. Input (R, C), views (R-1, C-1).
pub fn interface_views_2d<T>(field: ArrayView2<'_, T>) -> InterfaceViews<ArrayView2<'_, T>> {
    InterfaceViews {
        x_left: field.clone().slice_move(s![..-1, ..-1]),
        x_right: field.clone().slice_move(s![..-1, 1..]),
        y_left: field.clone().slice_move(s![..-1, ..-1]),
        y_right: field.slice_move(s![1.., ..-1]),
    }
}

/// Interface views of a component-major 3D field laid out (k, R, C).
/// Input (k, R, C), views (k, R-1, C-1).
pub fn interface_views_3d<T>(field: ArrayView3<'_, T>) -> InterfaceViews<ArrayView3<'_, T>> {
    InterfaceViews {
        x_left: field.clone().slice_move(s![.., ..-1, ..-1]),
        x_right: field.clone().slice_move(s![.., ..-1, 1..]),
        y_left: field.clone().slice_move(s![.., ..-1, ..-1]),
        y_right: field.slice_move(s![.., 1.., ..-1]),
    }
}

/// Rank-checked interface views of a dynamic-dimensional field.
///
/// Accepts rank-2 (scalar grid) and rank-3 (component-major grid)
/// fields; anything else is a structural error. The grid axes are
/// always the two trailing ones.
pub fn interface_views_dyn<T>(
    field: ArrayViewD<'_, T>,
) -> Result<InterfaceViews<ArrayViewD<'_, T>>, SolverError> {
    let rank = field.ndim();
    if rank != 2 && rank != 3 {
        return Err(SolverError::UnsupportedRank(rank));
    }

    fn corner<T>(
        mut view: ArrayViewD<'_, T>,
        rows: Slice,
        cols: Slice,
    ) -> ArrayViewD<'_, T> {
        let rank = view.ndim();
        view.slice_axis_inplace(Axis(rank - 2), rows);
        view.slice_axis_inplace(Axis(rank - 1), cols);
        view
    }

    Ok(InterfaceViews {
        x_left: corner(field.clone(), Slice::from(..-1), Slice::from(..-1)),
        x_right: corner(field.clone(), Slice::from(..-1), Slice::from(1..)),
        y_left: corner(field.clone(), Slice::from(..-1), Slice::from(..-1)),
        y_right: corner(field, Slice::from(1..), Slice::from(..-1)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    fn numbered(shape: (usize, usize)) -> Array2<f64> {
        Array2::from_shape_fn(shape, |(i, j)| (i * 100 + j) as f64)
    }

    #[test]
    fn test_2d_shapes() {
        let field = numbered((5, 7));
        let views = interface_views_2d(field.view());
        assert_eq!(views.x_left.dim(), (4, 6));
        assert_eq!(views.x_right.dim(), (4, 6));
        assert_eq!(views.y_left.dim(), (4, 6));
        assert_eq!(views.y_right.dim(), (4, 6));
    }

    #[test]
    fn test_2d_neighbor_pairing() {
        let field = numbered((4, 4));
        let views = interface_views_2d(field.view());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(views.x_left[[i, j]], field[[i, j]]);
                assert_eq!(views.x_right[[i, j]], field[[i, j + 1]]);
                assert_eq!(views.y_left[[i, j]], field[[i, j]]);
                assert_eq!(views.y_right[[i, j]], field[[i + 1, j]]);
            }
        }
    }

    #[test]
    fn test_3d_shapes() {
        let field = Array3::<f64>::zeros((3, 5, 7));
        let views = interface_views_3d(field.view());
        assert_eq!(views.x_left.dim(), (3, 4, 6));
        assert_eq!(views.x_right.dim(), (3, 4, 6));
        assert_eq!(views.y_left.dim(), (3, 4, 6));
        assert_eq!(views.y_right.dim(), (3, 4, 6));
    }

    #[test]
    fn test_dyn_matches_typed() {
        let field = numbered((4, 5));
        let typed = interface_views_2d(field.view());
        let dynamic = interface_views_dyn(field.view().into_dyn()).unwrap();
        assert_eq!(
            dynamic.x_right.shape(),
            typed.x_right.shape(),
        );
        assert_eq!(dynamic.y_right[[0, 0]], typed.y_right[[0, 0]]);
        assert_eq!(dynamic.x_right[[2, 3]], typed.x_right[[2, 3]]);
    }

    #[test]
    fn test_dyn_rejects_other_ranks() {
        let field1 = ndarray::Array1::<f64>::zeros(5);
        let err = interface_views_dyn(field1.view().into_dyn()).unwrap_err();
        assert!(matches!(err, SolverError::UnsupportedRank(1)));

        let field4 = ndarray::Array4::<f64>::zeros((2, 2, 2, 2));
        let err = interface_views_dyn(field4.view().into_dyn()).unwrap_err();
        assert!(matches!(err, SolverError::UnsupportedRank(4)));
    }
}
