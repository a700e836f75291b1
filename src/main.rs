use std::{error::Error, sync::mpsc::Receiver, thread};

use clap::{Parser, Subcommand};
use draw_alarm::{communication::Message, config::Config, tone::SquareBurst, DrawAlarm};
use eframe::{egui::vec2, run_native};
use rodio::{OutputStream, Sink};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// write the default config file
    Init {
        #[clap(long, short)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    simple_file_logger::init_logger!("draw_alarm").expect("couldn't initialize logger");

    let args = Args::parse();
    if let Some(Command::Init { force }) = args.command {
        if force || !Config::is_config_present() {
            Config::new().save(&Config::config_path());
        }
    }

    let (tx, rx) = std::sync::mpsc::channel();
    thread::spawn(move || ring_loop(&rx));

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(vec2(680.0, 620.0)),
        ..Default::default()
    };
    // run the gui
    run_native(
        "Draw Alarm",
        native_options,
        Box::new(|_| Box::new(DrawAlarm::new(tx))),
    )
    .map_err(Into::into)
}

/// owns the audio output and the ringing sink, driven purely by messages
/// from the gui
///
/// if the audio device can't be opened the alarm still works, it just rings
/// silently
fn ring_loop(rx: &Receiver<Message>) {
    let stream = OutputStream::try_default()
        .map_err(|e| log::warn!("no audio output, ringing will be silent: {e}"))
        .ok();
    let mut ringing: Option<Sink> = None;
    loop {
        match rx.recv() {
            Ok(Message::RingStarted { volume, frequency }) => {
                let Some((_, handle)) = &stream else {
                    continue;
                };
                match Sink::try_new(handle) {
                    Ok(sink) => {
                        sink.set_volume(volume / 100.0);
                        sink.append(SquareBurst::new(frequency));
                        sink.play();
                        ringing = Some(sink);
                    }
                    Err(e) => log::warn!("couldn't start the alarm tone: {e}"),
                }
            }
            Ok(Message::RingStopped) => {
                if let Some(sink) = ringing.take() {
                    sink.stop();
                }
            }
            // gui is gone
            Err(_) => break,
        }
    }
}
