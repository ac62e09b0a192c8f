use dsp_bench_plot::tracing::{get_subscriber, init_subscriber, DEFAULT_FILTER};

fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("dsp-bench-plot", DEFAULT_FILTER);
    init_subscriber(subscriber)?;

    let main_span = tracing::info_span!("main");
    let _main_span_guard = main_span.enter();

    dsp_bench_plot::run()?;
    Ok(())
}
