mod make_grid;
mod make_polygon;
mod make_tube;

pub use make_grid::MakeGrid;
pub use make_polygon::MakePolygon;
pub use make_tube::MakeTube;
