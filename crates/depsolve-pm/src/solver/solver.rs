use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::policy::{DeadlineCheck, SearchOptions};
use super::request::Request;
use super::rule::StateValidator;
use super::state::ConfigState;
use super::transaction::{render_plan, Command, CostModel};

use crate::event::{NoopListener, SearchListener};
use crate::repository::{Catalog, PackageId};

/// The cheapest goal state found and the commands that reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Final configuration
    pub state: ConfigState,
    /// Commands from the initial state to `state`, in order
    pub commands: Vec<Command>,
    /// Price of `commands` under the cost model
    pub cost: u64,
}

impl Solution {
    /// The plan as `+name=version` / `-name=version` strings
    pub fn plan(&self, catalog: &Catalog) -> Vec<String> {
        render_plan(catalog, &self.commands)
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every reachable branch was explored
    Exhausted,
    /// The wall-clock budget ran out
    DeadlineExceeded,
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Valid states pushed onto the active path (goals included)
    pub states_entered: u64,
    /// Goal states reached, improving or not
    pub goals_reached: u64,
    /// Times the best solution was replaced
    pub improvements: u64,
    /// Deepest command log seen
    pub max_depth: usize,
    /// Wall-clock time spent
    pub elapsed: Duration,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best solution, if any goal state was reached
    pub solution: Option<Solution>,
    pub termination: Termination,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// No solution, and the search did not finish. The instance may still
    /// be satisfiable.
    pub fn is_timed_out_without_solution(&self) -> bool {
        self.solution.is_none() && self.termination == Termination::DeadlineExceeded
    }
}

/// One state on the active path and the next catalog index to try from it.
struct Frame {
    state: ConfigState,
    next: usize,
    /// Whether entering this frame pushed a command onto the log
    via_command: bool,
}

/// Mutable bookkeeping for one run.
struct SearchContext {
    stack: Vec<Frame>,
    /// States on the active path
    on_path: HashSet<ConfigState>,
    /// Commands along the active path
    log: Vec<Command>,
    best: Option<Solution>,
    started: Instant,
    terminated: bool,
    stats: SearchStats,
}

impl SearchContext {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            on_path: HashSet::new(),
            log: Vec::new(),
            best: None,
            started: Instant::now(),
            terminated: false,
            stats: SearchStats::default(),
        }
    }

    fn best_cost(&self) -> u64 {
        self.best.as_ref().map_or(u64::MAX, |s| s.cost)
    }
}

/// Depth-first planner over install/uninstall steps.
///
/// From every state the solver tries, for each catalog package in catalog
/// order, to install it (if absent) or uninstall it (if present). States
/// already on the current path are skipped; invalid states are not
/// expanded. Goal states are priced and the cheapest is kept, the first
/// found winning ties. Output is deterministic for fixed inputs as long as
/// the search finishes within its budget.
pub struct Solver<'a> {
    catalog: &'a Catalog,
    request: &'a Request,
    options: SearchOptions,
    listener: &'a dyn SearchListener,
}

impl<'a> Solver<'a> {
    /// Create a new solver with default options
    pub fn new(catalog: &'a Catalog, request: &'a Request) -> Self {
        Self {
            catalog,
            request,
            options: SearchOptions::default(),
            listener: &NoopListener,
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_listener(mut self, listener: &'a dyn SearchListener) -> Self {
        self.listener = listener;
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Search for the cheapest plan from `initial` to a goal state.
    pub fn solve(&self, initial: ConfigState) -> SearchOutcome {
        log::debug!(
            "Searching over {} packages with {} constraints from a state of {} entries",
            self.catalog.len(),
            self.request.len(),
            initial.len()
        );

        let validator = StateValidator::new(self.catalog).with_full_revalidation(self.options.full_revalidation);
        let cost_model = CostModel::new(self.options.uninstall_penalty);
        let mut ctx = SearchContext::new();

        self.enter(&mut ctx, &validator, &cost_model, initial, None);

        while !ctx.terminated {
            let Some(frame) = ctx.stack.last_mut() else {
                break;
            };

            if frame.next >= self.catalog.len() {
                if let Some(done) = ctx.stack.pop() {
                    ctx.on_path.remove(&done.state);
                    if done.via_command {
                        ctx.log.pop();
                    }
                }
                continue;
            }

            let id = PackageId::new(frame.next);
            frame.next += 1;

            if let Some((child, command)) = self.step(&ctx.log, &frame.state, id) {
                self.enter(&mut ctx, &validator, &cost_model, child, Some(command));
            }
        }

        ctx.stats.elapsed = ctx.started.elapsed();
        let termination = if ctx.terminated {
            Termination::DeadlineExceeded
        } else {
            Termination::Exhausted
        };

        match &ctx.best {
            Some(best) => log::info!(
                "Best plan has {} commands at cost {} ({} states, {} goals, {:.3}s)",
                best.commands.len(),
                best.cost,
                ctx.stats.states_entered,
                ctx.stats.goals_reached,
                ctx.stats.elapsed.as_secs_f64()
            ),
            None => log::info!(
                "No goal state reached ({} states, {:.3}s, {:?})",
                ctx.stats.states_entered,
                ctx.stats.elapsed.as_secs_f64(),
                termination
            ),
        }

        SearchOutcome {
            solution: ctx.best,
            termination,
            stats: ctx.stats,
        }
    }

    /// The child reached from `state` by acting on package `id`, if that
    /// branch is allowed.
    fn step(&self, log: &[Command], state: &ConfigState, id: PackageId) -> Option<(ConfigState, Command)> {
        let heuristics = &self.options.heuristics;

        if !state.contains(id) {
            let uninstall = Command::uninstall(id);
            if heuristics.skip_reinstall_after_uninstall && log.contains(&uninstall) {
                return None;
            }
            return Some((state.with_installed(id), Command::install(id)));
        }

        let fresh = !heuristics.skip_uninstall_after_install
            || !log.contains(&Command::install(id))
            || log.len() < self.request.len();
        let pinned = heuristics.respect_pins && self.request.is_pinned(self.catalog.get(id));

        if fresh && !pinned {
            Some((state.without(id), Command::uninstall(id)))
        } else {
            None
        }
    }

    /// Try to enter `state`, reached by `command` from the top frame.
    ///
    /// Goal states are priced and left immediately; other valid states are
    /// pushed so their children get expanded.
    fn enter(
        &self,
        ctx: &mut SearchContext,
        validator: &StateValidator<'_>,
        cost_model: &CostModel,
        state: ConfigState,
        command: Option<Command>,
    ) {
        if self.options.deadline_check == DeadlineCheck::EveryStep && self.deadline_passed(ctx) {
            log::warn!("Search deadline of {:?} reached", self.options.timeout);
            ctx.terminated = true;
        }
        if ctx.terminated || ctx.on_path.contains(&state) || !validator.is_valid(&state) {
            return;
        }

        if let Some(command) = command {
            ctx.log.push(command);
        }
        ctx.stats.states_entered += 1;
        ctx.stats.max_depth = ctx.stats.max_depth.max(ctx.log.len());
        self.listener.state_entered(&ctx.stats);

        if self.request.is_satisfied_by(self.catalog, &state) {
            ctx.stats.goals_reached += 1;
            let cost = cost_model.cost(self.catalog, &ctx.log);

            if cost < ctx.best_cost() {
                log::debug!("Found plan of {} commands at cost {}", ctx.log.len(), cost);
                let solution = Solution {
                    state,
                    commands: ctx.log.clone(),
                    cost,
                };
                self.listener.solution_improved(&solution);
                ctx.best = Some(solution);
                ctx.stats.improvements += 1;
            } else if self.options.deadline_check == DeadlineCheck::OnGoal && self.deadline_passed(ctx) {
                log::warn!("Search deadline of {:?} reached", self.options.timeout);
                ctx.terminated = true;
            }

            if command.is_some() {
                ctx.log.pop();
            }
            return;
        }

        ctx.on_path.insert(state.clone());
        ctx.stack.push(Frame {
            state,
            next: 0,
            via_command: command.is_some(),
        });
    }

    fn deadline_passed(&self, ctx: &SearchContext) -> bool {
        ctx.started.elapsed() > self.options.timeout
    }
}
