use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
use tracing_subscriber::EnvFilter;

use gpui_exprgraph::{GpuiGraphConfig, GpuiGraphView, GraphConfig, Theme};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Usage: expression_graph [--light] [EXPRESSION]
    let mut light = false;
    let mut expression = None;
    for arg in std::env::args().skip(1) {
        if arg == "--light" {
            light = true;
        } else {
            expression = Some(arg);
        }
    }
    let expression = expression.unwrap_or_else(|| "r = 4 * cos(3*t)".to_string());

    Application::new().run(move |cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(640.0), px(480.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, move |_window, cx| {
            let theme = if light { Theme::light() } else { Theme::dark() };
            let config = GpuiGraphConfig::default()
                .with_graph(GraphConfig::default().with_theme(theme));
            let view = GpuiGraphView::with_config(config);
            view.graph_handle().set_expression(Some(expression));
            cx.new(|_| view)
        })
        .unwrap();
    });
}
