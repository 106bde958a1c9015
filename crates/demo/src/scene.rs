//! The demo tree: nested series, a parallel group and a runtime branch.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use timed_fsm::{AdvancePolicy, Behavior, BoxedNode, Context, Flow, HookResult, Leaf, Series, State};
use tracing::info;

/// Leaf that announces when it starts and ends.
pub struct PrintStep {
    label: String,
    duration: Duration,
}

impl PrintStep {
    pub fn new(label: impl Into<String>, duration: Duration) -> Self {
        Self {
            label: label.into(),
            duration,
        }
    }
}

impl Behavior for PrintStep {
    fn on_start(&mut self) -> HookResult<Flow> {
        info!("Start: {}", self.label);
        Ok(Flow::Continue)
    }

    fn on_update(&mut self) -> HookResult<Flow> {
        Ok(Flow::Continue)
    }

    fn on_end(&mut self) -> HookResult<()> {
        info!("End: {}", self.label);
        Ok(())
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

fn step(cx: &Context, label: &'static str, duration: Duration) -> BoxedNode {
    cx.state(PrintStep::new(label, duration)).named(label).boxed()
}

/// Builds the scripted sequence driven by `main`.
pub fn build(cx: &Context, step_len: Duration, policy: AdvancePolicy) -> State<Series> {
    let heads = Arc::new(AtomicBool::new(false));

    let flip = {
        let heads = Arc::clone(&heads);
        cx.state(Leaf::new(step_len).with_end(move || {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(anyhow::Error::from)?
                .subsec_nanos();
            heads.store(nanos % 2 == 0, Ordering::SeqCst);
            Ok(())
        }))
        .named("coin flip")
        .boxed()
    };

    let finale = {
        let branch_cx = cx.clone();
        cx.proxy(move || {
            if heads.load(Ordering::SeqCst) {
                info!("Coin landed heads");
                vec![step(&branch_cx, "Take a bow", step_len)]
            } else {
                info!("Coin landed tails");
                vec![
                    step(&branch_cx, "Encore", step_len.saturating_mul(2)),
                    step(&branch_cx, "Curtain", step_len),
                ]
            }
        })
        .named("finale")
        .boxed()
    };

    cx.state(
        Series::new(vec![
            cx.series(vec![
                step(cx, "Series 1, State 1", step_len),
                step(cx, "Series 1, State 2", step_len),
            ])
            .boxed(),
            cx.series(vec![
                step(cx, "Series 2, State 1", step_len),
                step(cx, "Series 2, State 2", step_len),
                step(cx, "Series 2, State 3", step_len),
            ])
            .boxed(),
            cx.group(vec![step(cx, "Drumroll", step_len.saturating_mul(2)), flip])
                .named("drumroll")
                .boxed(),
            finale,
        ])
        .with_policy(policy),
    )
    .named("show")
}
