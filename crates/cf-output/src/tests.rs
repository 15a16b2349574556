//! Integration tests for cf-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{OccupancyRow, RequestRow, RouteRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn route_row(request: u32, agent: u32, cost: f64) -> RouteRow {
        RouteRow { request, agent, cost, length: 9, refreshed: agent == 0 }
    }

    fn read_all(dir: &TempDir, name: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("routes.csv").exists());
        assert!(dir.path().join("requests.csv").exists());
        assert!(dir.path().join("occupancy.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(read_all(&dir, "routes.csv").0, ["request", "agent", "cost", "length", "refreshed"]);
        assert_eq!(
            read_all(&dir, "requests.csv").0,
            [
                "request",
                "start_row",
                "start_col",
                "target_row",
                "target_col",
                "routed",
                "unreachable",
                "refreshes",
                "total_cost"
            ]
        );
        assert_eq!(read_all(&dir, "occupancy.csv").0, ["row", "col", "count"]);
    }

    #[test]
    fn csv_route_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_routes(&[route_row(0, 0, 8.0), route_row(0, 1, 9.5), route_row(1, 0, f64::NAN)]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(&dir, "routes.csv");
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][2], "8");
        assert_eq!(&rows[0][4], "1"); // refreshed
        assert_eq!(&rows[1][2], "9.5");
        assert_eq!(&rows[1][4], "0");
        assert_eq!(&rows[2][2], ""); // unreachable
    }

    #[test]
    fn csv_request_and_occupancy_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_request(&RequestRow {
            request:     4,
            start_row:   1,
            start_col:   2,
            target_row:  3,
            target_col:  4,
            routed:      5,
            unreachable: 0,
            refreshes:   1,
            total_cost:  40.0,
        })
        .unwrap();
        w.write_occupancy(&[OccupancyRow { row: 0, col: 1, count: 3 }]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(&dir, "requests.csv");
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["4", "1", "2", "3", "4", "5", "0", "1", "40"]);
        let (_, rows) = read_all(&dir, "occupancy.csv");
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["0", "1", "3"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_routes(&[]).unwrap();
        w.write_occupancy(&[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        use cf_core::{Position, RequestId, RoutingConfig};
        use cf_grid::ObstacleGrid;
        use cf_movement::{MovementQueue, MovementRequest};
        use cf_sim::SimBuilder;

        use crate::observer::SimOutputObserver;

        let config = RoutingConfig { weight0: 1.0, alpha: 1.0, modulo: 2, ..RoutingConfig::default() };
        let grid = ObstacleGrid::parse_reader("....\n.##.\n....\n".as_bytes()).unwrap();
        let requests: MovementQueue = vec![
            MovementRequest::new(RequestId(0), Position::new(0, 0), Position::new(2, 3), 3),
            MovementRequest::new(RequestId(1), Position::new(1, 1), Position::new(0, 0), 1),
            MovementRequest::new(RequestId(2), Position::new(2, 0), Position::new(0, 3), 2),
        ]
        .into_iter()
        .collect();
        let mut sim = SimBuilder::new(config, grid).requests(requests).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        let report = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Request 1 starts on a wall and is skipped: 3 + 2 agents logged.
        let (_, routes) = read_all(&dir, "routes.csv");
        assert_eq!(routes.len(), 5);
        let refreshed: Vec<&str> = routes.iter().map(|r| r.get(4).unwrap()).collect();
        assert_eq!(refreshed, ["1", "0", "1", "1", "0"]);

        let (_, requests) = read_all(&dir, "requests.csv");
        assert_eq!(requests.len(), 2);
        assert_eq!(report.skipped_requests, 1);

        let (_, occupancy) = read_all(&dir, "occupancy.csv");
        let total: u64 = occupancy.iter().map(|r| r[2].parse::<u64>().unwrap()).sum();
        assert_eq!(total, sim.env.total_traversals());
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use cf_core::{CellId, Position};
    use cf_grid::{Environment, ObstacleGrid};

    use crate::row::{OccupancyRow, occupancy_rows};

    #[test]
    fn occupancy_rows_skip_unused_cells() {
        let grid = ObstacleGrid::open(2, 3).unwrap();
        let mut env = Environment::from_obstacle_grid(&grid);
        env.apply_path(&[CellId(1), CellId(4), CellId(5)], 1);
        env.apply_path(&[env.cell(Position::new(1, 2))], 2);

        assert_eq!(
            occupancy_rows(&env),
            vec![
                OccupancyRow { row: 0, col: 1, count: 1 },
                OccupancyRow { row: 1, col: 1, count: 1 },
                OccupancyRow { row: 1, col: 2, count: 3 },
            ]
        );
    }
}

// ── PNG ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod png_tests {
    use cf_core::Position;
    use cf_grid::{Environment, IntensityGrid, ObstacleGrid, OverlayImage};
    use image::{ImageFormat, Rgb};

    use crate::png::{save_occupancy_png, save_overlay_png, write_gray_png, write_rgb_png};

    #[test]
    fn gray_png_decodes_to_same_pixels() {
        let grid = IntensityGrid { rows: 2, cols: 3, values: vec![0.0, 0.5, 1.0, 1.0, 0.0, 0.25] };
        let mut out = Vec::new();
        write_gray_png(&mut out, &grid.to_gray_image(1)).unwrap();
        assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory_with_format(&out, ImageFormat::Png).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.as_raw(), &vec![0, 128, 255, 255, 0, 64]);
    }

    #[test]
    fn overlay_png_keeps_red_channel() {
        let grid = ObstacleGrid::open(1, 2).unwrap();
        let mut env = Environment::from_obstacle_grid(&grid);
        let a = env.cell(Position::new(0, 0));
        let b = env.cell(Position::new(0, 1));
        env.apply_path(&[a, b], 1);
        env.apply_path(&[a], 1);
        env.apply_path(&[a], 1);

        let mut overlay = OverlayImage::from_obstacles(&grid, 1);
        overlay.overlay_occupancy(&env);
        let mut out = Vec::new();
        write_rgb_png(&mut out, overlay.as_image()).unwrap();

        let decoded = image::load_from_memory_with_format(&out, ImageFormat::Png).unwrap().to_rgb8();
        assert_eq!(*decoded.get_pixel(0, 0), Rgb([0, 0, 0]));
        // 255 * (2/3)^3 = 75.55…
        assert_eq!(*decoded.get_pixel(1, 0), Rgb([75, 0, 0]));
    }

    #[test]
    fn files_written_at_plan_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let grid = IntensityGrid { rows: 1, cols: 2, values: vec![1.0, 0.0] };
        let overlay = OverlayImage::filled(2, 3, 2, OverlayImage::BLACK);
        save_occupancy_png(&dir.path().join("occupancy.png"), &grid, 3).unwrap();
        save_overlay_png(&dir.path().join("overlay.png"), &overlay).unwrap();

        let gray = image::open(dir.path().join("occupancy.png")).unwrap();
        assert_eq!((gray.width(), gray.height()), (6, 3));
        let rgb = image::open(dir.path().join("overlay.png")).unwrap();
        assert_eq!((rgb.width(), rgb.height()), (6, 4));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let grid = IntensityGrid { rows: 1, cols: 1, values: vec![0.0] };
        assert!(save_occupancy_png(&dir.path().join("absent/occupancy.png"), &grid, 1).is_err());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{OccupancyRow, RequestRow, RouteRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn open(dir: &TempDir) -> rusqlite::Connection {
        rusqlite::Connection::open(dir.path().join("output.db")).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_route_rows() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_routes(&[
            RouteRow { request: 0, agent: 0, cost: 8.0, length: 9, refreshed: true },
            RouteRow { request: 0, agent: 1, cost: 10.0, length: 9, refreshed: false },
            RouteRow { request: 1, agent: 0, cost: f64::NAN, length: 0, refreshed: true },
        ])
        .unwrap();
        w.finish().unwrap();

        let conn = open(&dir);
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM routes", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 3);
        let refreshed: i64 = conn
            .query_row("SELECT refreshed FROM routes WHERE request = 0 AND agent = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(refreshed, 1);
        let cost: Option<f64> =
            conn.query_row("SELECT cost FROM routes WHERE request = 1", [], |r| r.get(0)).unwrap();
        assert_eq!(cost, None, "unreachable agents store NULL cost");
    }

    #[test]
    fn sqlite_request_row() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_request(&RequestRow {
            request:     7,
            start_row:   1,
            start_col:   2,
            target_row:  3,
            target_col:  4,
            routed:      10,
            unreachable: 2,
            refreshes:   3,
            total_cost:  123.5,
        })
        .unwrap();
        w.finish().unwrap();

        let (routed, unreachable, cost): (i64, i64, f64) = open(&dir)
            .query_row(
                "SELECT routed, unreachable, total_cost FROM requests WHERE request = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!((routed, unreachable, cost), (10, 2, 123.5));
    }

    #[test]
    fn sqlite_occupancy_rows() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_occupancy(&[OccupancyRow { row: 0, col: 0, count: 2 }, OccupancyRow { row: 3, col: 1, count: 5 }])
            .unwrap();
        w.finish().unwrap();

        let total: i64 = open(&dir).query_row("SELECT SUM(count) FROM occupancy", [], |r| r.get(0)).unwrap();
        assert_eq!(total, 7);
    }
}
