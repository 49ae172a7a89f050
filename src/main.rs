use nnstage::app::App;
use nnstage::cli::Args;
use nnstage::config::StageConfig;
use nnstage::ui;
use nnstage::widgets::handle::WidgetHandle;

use clap::Parser;
use glam::Vec2;
use log::{debug, info};

/// Scripted headless session: walks the stage through the same interactions
/// a user would perform in the browser, one per keyframe.
fn scripted_input(app: &mut App, frame: usize) {
    match frame {
        5 => {
            let url = app.config().dataset_sources[0].url.clone();
            app.change_select(ui::DATASET_URL_SELECT, &url);
        }
        15 => app.click(ui::COMPILE_DATASET_BUTTON),
        25 => app.set_active_sub_canvas(ui::NETWORK_SUB_CANVAS),
        30 => app.click(ui::ADD_HIDDEN_LAYER_BUTTON),
        35 => app.click(ui::COMPILE_NETWORK_BUTTON),
        45 => app.click(ui::GET_SAMPLE_BUTTON),
        55 => app.click(ui::PREDICT_BUTTON),
        65 => app.click(ui::FIT_BUTTON),
        _ => {}
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    info!("nnstage starting...");
    debug!("Command-line args: {:?}", args);

    let config = match &args.config {
        Some(path) => StageConfig::from_json(path)?,
        None => StageConfig::default(),
    };

    let viewport = Vec2::new(args.width, args.height);
    let mut app = App::new(config, viewport)?;

    for frame in 0..args.frames {
        scripted_input(&mut app, frame);
        let cursor = app.frame();
        debug!("frame {frame}: cursor {:?}", cursor);
    }

    // Final widget report
    for widget in app.registry.iter() {
        let Some(handle) = widget.handle() else {
            continue;
        };
        let base = handle.base();
        info!(
            "{:<28} {:>9} visible={} disabled={} pos=({:.0},{:.0}) size=({:.0},{:.0})",
            widget.descriptor.id.as_deref().unwrap_or("(anonymous)"),
            handle.kind_name(),
            base.visible,
            base.is_disabled(),
            base.position.x,
            base.position.y,
            base.size.x,
            base.size.y,
        );
    }
    info!(
        "session done: {} samples, dataset compiled={}, network compiled={}, hidden layers={}",
        app.state.dataset.sample_count,
        app.state.dataset.is_compiled,
        app.state.network.is_compiled,
        app.session.hidden_layer_count(),
    );

    Ok(())
}
