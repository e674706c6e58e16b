use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Context;
use rest_table_mvu::widget::view::{FETCH_BUTTON, NAME_INPUT, QUERY_INPUT};
use rest_table_mvu::{
    trace_init, Action, DomEvent, Emitter, EventData, Lifecycle, MarkupRenderer, Node,
    ReqwestTransport, TableWidget, WidgetConfig, WidgetRuntime,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE: &str = "commands: name <text> | query <encoded query> | fetch | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trace_init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => WidgetConfig::load_from(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => WidgetConfig::load().context("loading Widget.toml")?,
    };
    let transport = ReqwestTransport::new(&config.instance_url, config.credentials())?;
    let widget = TableWidget::new(&config, Arc::new(transport));
    let initial_state = widget.initial_state();

    let renderer = MarkupRenderer::new(std::io::stdout());
    let latest = renderer.latest();
    let spawner = |fut: Pin<Box<dyn Future<Output = ()> + Send>>| {
        tokio::spawn(fut);
    };

    let mut runtime = WidgetRuntime::new(initial_state, widget, renderer, spawner);
    let emitter = runtime.emitter();

    eprintln!("{USAGE}");
    tokio::spawn(read_commands(latest, emitter));

    runtime.run().await;
    Ok(())
}

/// Turn stdin lines into DOM events on the most recently rendered tree.
async fn read_commands(latest: Arc<spin::Mutex<Option<Node>>>, emitter: Emitter) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::error!(error = %err, "failed to read stdin");
                break;
            }
        };

        let (command, argument) = match line.trim().split_once(' ') {
            Some((command, argument)) => (command.to_string(), argument.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        };
        let target = match command.as_str() {
            "name" => (NAME_INPUT, DomEvent::KeyUp),
            "query" => (QUERY_INPUT, DomEvent::Change),
            "fetch" => (FETCH_BUTTON, DomEvent::Click),
            "quit" => break,
            "" => continue,
            _ => {
                eprintln!("{USAGE}");
                continue;
            }
        };

        let tree = latest.lock();
        let fired = tree
            .as_ref()
            .and_then(|tree| tree.find(target.0))
            .map(|node| node.fire(target.1, EventData::value(argument)))
            .unwrap_or(false);
        if !fired {
            tracing::warn!(element = target.0, "nothing to fire on");
        }
    }

    emitter.emit(Action::lifecycle(Lifecycle::Unmounted));
}
