//! Integration tests for cf-sim.

use cf_core::{Downscale, Position, RequestId, RoutingConfig};
use cf_grid::{Environment, ObstacleGrid};
use cf_movement::{MovementQueue, MovementRequest};
use cf_route::AgentStep;

use crate::{NoopObserver, RequestSummary, SimBuilder, SimObserver, SimReport, SkipReason};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(weight0: f64, alpha: f64, modulo: u32) -> RoutingConfig {
    RoutingConfig { weight0, alpha, modulo, downscale: Downscale::Factor(1) }
}

fn grid(rows: &[&str]) -> ObstacleGrid {
    ObstacleGrid::parse_reader(rows.join("\n").as_bytes()).unwrap()
}

fn open5() -> ObstacleGrid {
    ObstacleGrid::open(5, 5).unwrap()
}

fn queue(reqs: &[((u32, u32), (u32, u32), u32)]) -> MovementQueue {
    reqs.iter()
        .enumerate()
        .map(|(i, &(s, t, n))| {
            MovementRequest::new(RequestId(i as u32), Position::new(s.0, s.1), Position::new(t.0, t.1), n)
        })
        .collect()
}

/// Records every callback as a compact string plus the per-agent costs.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    costs:  Vec<f64>,
    ended:  Option<(u32, SimReport)>,
}

impl SimObserver for Recorder {
    fn on_request_start(&mut self, request: &MovementRequest) {
        self.events.push(format!("start {}", request.id.0));
    }
    fn on_request_skipped(&mut self, request: &MovementRequest, _reason: SkipReason) {
        self.events.push(format!("skip {}", request.id.0));
    }
    fn on_agent_routed(&mut self, request: RequestId, agent: u32, step: &AgentStep) {
        self.events.push(format!("agent {}.{agent}{}", request.0, if step.refreshed { " R" } else { "" }));
        if let Some(route) = &step.route {
            self.costs.push(route.cost);
        }
    }
    fn on_request_end(&mut self, summary: &RequestSummary) {
        self.events.push(format!("end {}", summary.id.0));
    }
    fn on_sim_end(&mut self, env: &Environment, report: &SimReport) {
        self.ended = Some((env.max_count(), report.clone()));
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn invalid_weights_rejected() {
        let err = SimBuilder::new(config(0.0, 0.0, 1), open5()).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn zero_modulo_rejected() {
        let err = SimBuilder::new(config(1.0, 1.0, 0), open5()).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn downscale_applies_to_grid_and_requests() {
        let cfg = RoutingConfig { downscale: Downscale::Factor(2), ..config(1.0, 0.0, 5) };
        let sim = SimBuilder::new(cfg, ObstacleGrid::open(10, 8).unwrap())
            .requests(queue(&[((9, 7), (1, 1), 1)]))
            .build()
            .unwrap();
        assert_eq!(sim.factor, 2);
        assert_eq!((sim.env.rows(), sim.env.cols()), (5, 4));
        let r = sim.requests.front().unwrap();
        assert_eq!(r.start, Position::new(4, 3));
        assert_eq!(r.target, Position::new(0, 0));
    }

    #[test]
    fn loaded_requests_are_downscaled_once() {
        let file = "start,target,count\n9:7,4:2,1\n";
        let requests = cf_movement::load_movements_reader(file.as_bytes()).unwrap();
        let cfg = RoutingConfig { downscale: Downscale::Factor(2), ..config(1.0, 0.0, 5) };
        let mut sim = SimBuilder::new(cfg, ObstacleGrid::open(10, 8).unwrap())
            .requests(requests)
            .build()
            .unwrap();
        let r = sim.requests.front().copied().unwrap();
        assert_eq!((r.start, r.target), (Position::new(4, 3), Position::new(2, 1)));

        let report = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(report.agents_routed, 1);
        assert_eq!(report.total_cost, 4.0);
    }

    #[test]
    fn auto_downscale_keeps_small_grids() {
        let cfg = RoutingConfig { downscale: Downscale::Auto, ..config(1.0, 1.0, 5) };
        let sim = SimBuilder::new(cfg, open5()).build().unwrap();
        assert_eq!(sim.factor, 1);
        assert_eq!(sim.env.cell_count(), 25);
    }

    #[test]
    fn downscale_too_large_is_grid_error() {
        let cfg = RoutingConfig { downscale: Downscale::Factor(9), ..config(1.0, 1.0, 5) };
        let err = SimBuilder::new(cfg, open5()).build().err().unwrap();
        assert!(matches!(err, SimError::Grid(_)));
    }

    #[test]
    fn inflation_closes_gaps() {
        let g = grid(&["..#..", ".....", "..#.."]);
        let mut sim = SimBuilder::new(config(1.0, 1.0, 5), g)
            .inflate(1)
            .requests(queue(&[((1, 0), (1, 4), 2)]))
            .build()
            .unwrap();
        assert!(sim.env.is_blocked(sim.env.cell(Position::new(1, 2))));
        assert!(sim.env.is_free(Position::new(1, 0)));
        let report = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(report.skipped_requests, 0);
        assert_eq!(report.agents_unreachable, 2);
        assert_eq!(sim.env.total_traversals(), 0);
    }
}

// ── Request loop ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn single_agent_end_to_end() {
        let mut sim = SimBuilder::new(config(1.0, 0.0, 10), open5())
            .requests(queue(&[((0, 0), (4, 4), 1)]))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let report = sim.run(&mut rec).unwrap();

        assert_eq!(rec.costs, vec![8.0]);
        assert_eq!(report.requests, 1);
        assert_eq!(report.agents_routed, 1);
        assert_eq!(report.refreshes, 1);
        assert_eq!(report.total_cost, 8.0);
        assert_eq!(sim.env.total_traversals(), 9);
        assert_eq!(sim.env.max_count(), 1);
        let used = sim.env.occupancy_slice().iter().filter(|&&c| c == 1).count();
        assert_eq!(used, 9);
        assert!(sim.requests.is_empty());
    }

    #[test]
    fn congestion_raises_later_costs() {
        let mut sim = SimBuilder::new(config(1.0, 1.0, 10), open5())
            .requests(queue(&[((0, 0), (4, 4), 5)]))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.costs.len(), 5);
        assert_eq!(rec.costs[0], 8.0);
        assert!(rec.costs.windows(2).all(|w| w[1] >= w[0]), "costs not monotone: {:?}", rec.costs);
        assert!(rec.costs[4] > rec.costs[0]);
        assert_eq!(sim.env.occupancy(sim.env.cell(Position::new(4, 4))), 5);
        assert_eq!(sim.env.max_count(), 5);
    }

    #[test]
    fn callbacks_in_order_with_refresh_marks() {
        let mut sim = SimBuilder::new(config(1.0, 1.0, 2), open5())
            .requests(queue(&[((0, 0), (0, 4), 3), ((9, 9), (0, 0), 1), ((4, 0), (4, 4), 1)]))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let report = sim.run(&mut rec).unwrap();

        assert_eq!(
            rec.events,
            vec![
                "start 0", "agent 0.0 R", "agent 0.1", "agent 0.2 R", "end 0",
                "skip 1",
                "start 2", "agent 2.0 R", "end 2",
            ]
        );
        assert_eq!(report.requests, 2);
        assert_eq!(report.skipped_requests, 1);
        assert_eq!(report.refreshes, 3);
        let (max, final_report) = rec.ended.unwrap();
        assert_eq!(max, sim.env.max_count());
        assert_eq!(final_report, report);
    }

    #[test]
    fn blocked_endpoints_skip_without_snapping() {
        let g = grid(&[".....", ".###.", "....."]);
        let mut sim = SimBuilder::new(config(1.0, 1.0, 3), g)
            .requests(queue(&[((1, 2), (0, 0), 2), ((0, 0), (1, 1), 2)]))
            .build()
            .unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(report.skipped_requests, 2);
        assert_eq!(report.agents_routed, 0);
        assert_eq!(sim.env.total_traversals(), 0);
    }

    #[test]
    fn snapping_moves_endpoints_to_free_cells() {
        let g = grid(&[".....", ".###.", "....."]);
        let mut sim = SimBuilder::new(config(1.0, 0.0, 3), g)
            .snap_endpoints(true)
            .requests(queue(&[((1, 2), (2, 2), 1), ((7, 0), (0, 0), 1)]))
            .build()
            .unwrap();
        let mut summaries = Vec::new();
        while let Some(request) = sim.requests.pop() {
            summaries.push(sim.process_request(request, &mut NoopObserver).unwrap().unwrap());
        }
        // (1,2) is a wall: nearest free cells are (0,2) and (2,2).
        assert!(summaries[0].start == Position::new(0, 2) || summaries[0].start == Position::new(2, 2));
        assert_eq!(summaries[0].agents_routed, 1);
        // (7,0) is outside a 3-row grid: snaps to (2,0).
        assert_eq!(summaries[1].start, Position::new(2, 0));
        assert_eq!(summaries[1].total_cost, 2.0);
        assert_eq!(sim.report().skipped_requests, 0);
    }

    #[test]
    fn unreachable_agents_counted_not_fatal() {
        let g = grid(&["..#..", "..#..", "..#.."]);
        let mut sim = SimBuilder::new(config(1.0, 1.0, 2), g)
            .requests(queue(&[((0, 0), (0, 4), 3), ((0, 0), (2, 1), 1)]))
            .build()
            .unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(report.requests, 2);
        assert_eq!(report.agents_unreachable, 3);
        assert_eq!(report.agents_routed, 1);
        assert_eq!(sim.env.total_traversals(), 4);
    }

    #[test]
    fn zero_count_request_routes_nothing() {
        let mut sim = SimBuilder::new(config(1.0, 1.0, 2), open5())
            .requests(queue(&[((0, 0), (4, 4), 0)]))
            .build()
            .unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(report.requests, 1);
        assert_eq!(report.agents_routed, 0);
        assert_eq!(report.refreshes, 0);
        assert_eq!(sim.env.max_count(), 0);
    }

    #[test]
    fn run_requests_steps_incrementally() {
        let mut sim = SimBuilder::new(config(1.0, 1.0, 4), open5())
            .requests(queue(&[((0, 0), (4, 4), 2), ((4, 0), (0, 4), 2), ((2, 2), (2, 2), 1)]))
            .build()
            .unwrap();
        assert_eq!(sim.run_requests(2, &mut NoopObserver).unwrap(), 2);
        assert_eq!(sim.requests.len(), 1);
        assert_eq!(sim.report().agents_routed, 4);
        assert_eq!(sim.run_requests(5, &mut NoopObserver).unwrap(), 1);
        assert_eq!(sim.report().agents_routed, 5);
        assert_eq!(sim.report().mean_cost(), sim.report().total_cost / 5.0);
    }

    #[test]
    fn identical_runs_are_deterministic() {
        let g = ObstacleGrid::random(12, 12, 0.2, 8).unwrap();
        let free: Vec<Position> = (0..12)
            .flat_map(|r| (0..12).map(move |c| Position::new(r, c)))
            .filter(|&p| !g.is_blocked(p))
            .collect();
        let reqs = queue(&[
            ((free[0].row, free[0].col), (free[free.len() - 1].row, free[free.len() - 1].col), 7),
            ((free[5].row, free[5].col), (free[40].row, free[40].col), 4),
        ]);
        let run = || {
            let mut sim = SimBuilder::new(config(1.0, 2.0, 3), g.clone())
                .requests(reqs.clone())
                .build()
                .unwrap();
            let report = sim.run(&mut NoopObserver).unwrap();
            (report, sim.into_environment().occupancy_slice().to_vec())
        };
        assert_eq!(run(), run());
    }
}

// ── Session sweep ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod sweep_tests {
    use super::*;
    use crate::run_sessions;

    #[test]
    fn sessions_are_independent_and_ordered() {
        let reqs = queue(&[((0, 0), (4, 4), 6)]);
        let configs = vec![config(1.0, 0.0, 3), config(1.0, 5.0, 3), config(0.0, 1.0, 0)];
        let results = run_sessions(&open5(), &reqs, &configs, 0, false);
        assert_eq!(results.len(), 3);

        let flat = results[0].as_ref().unwrap();
        let congested = results[1].as_ref().unwrap();
        assert_eq!(flat.config.alpha, 0.0);
        assert_eq!(flat.report.agents_routed, 6);
        assert_eq!(flat.report.total_cost, 48.0);
        assert!(congested.report.total_cost > flat.report.total_cost);
        // Congestion spreads agents over more cells.
        let used = |env: &Environment| env.occupancy_slice().iter().filter(|&&c| c > 0).count();
        assert!(used(&congested.env) > used(&flat.env));
        assert!(results[2].is_err());
    }
}
