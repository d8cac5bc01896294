//! Command dispatch.

use std::io::Write;

use senbiot_model::{Phase, Setup, Setups};
use senbiot_session::{codec, Delay, Session, Transport};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::error::{AppError, AppResult};
use crate::payload::{encoded_text, read_message};
use crate::selection::{resolve_port, resolve_selection};
use crate::serial::{available_ports, describe, log_available_ports, open_port};

/// Execute the parsed command line.
pub fn run(cli: &Cli) -> AppResult<()> {
    let mut out = std::io::stdout().lock();
    match &cli.command {
        Command::Ports => list_ports(&mut out),
        Command::Decode { message, base64 } => {
            let input = read_message(message.as_deref())?.ok_or_else(missing_message)?;
            decode_message(&input, *base64, &mut out)
        }
        Command::Run { .. } | Command::Send { .. } | Command::Check => run_device(cli, &mut out),
    }
}

fn missing_message() -> AppError {
    AppError::Usage("no message given, use --message or pipe it on stdin".to_string())
}

fn log_known_setups(doc: &Setups) {
    info!("Known setups (provider, device):");
    for (provider, device) in doc.pairs() {
        info!("  {}, {}", provider, device);
    }
}

fn list_ports(out: &mut impl Write) -> AppResult<()> {
    for port in available_ports()? {
        writeln!(out, "Found port: {}", describe(&port)).map_err(AppError::Output)?;
    }
    Ok(())
}

/// Decode a hex or base64 payload and write it as text.
pub fn decode_message(input: &[u8], base64: bool, out: &mut impl Write) -> AppResult<()> {
    let text = encoded_text(input);
    let decoded = if base64 {
        codec::decode_base64(&text)?
    } else {
        codec::decode(&text)?
    };
    out.write_all(&decoded).map_err(AppError::Output)?;
    writeln!(out).map_err(AppError::Output)
}

fn run_device(cli: &Cli, out: &mut impl Write) -> AppResult<()> {
    let phases = cli.command.phases().unwrap_or_default();

    let doc = Setups::from_file(&cli.config)?;
    let selection = resolve_selection(cli.device.as_deref(), cli.provider.as_deref(), &doc)?;
    let setup = doc
        .find_setup(&selection.provider, &selection.device)
        .inspect_err(|_| log_known_setups(&doc))?;

    // Without a message the prefix is sent with an empty payload.
    let message = if phases.contains(&Phase::SendMessage) {
        read_message(cli.command.message_flag())?.unwrap_or_default()
    } else {
        Vec::new()
    };

    let Some(port) = resolve_port(cli.port.as_deref(), &doc) else {
        log_available_ports();
        return Err(AppError::Usage(
            "no port name present, please set --port".to_string(),
        ));
    };
    let transport = open_port(&port, cli.baud, cli.read_timeout())
        .inspect_err(|_| log_available_ports())?;
    info!(
        "Using {} for {} on {} ({} baud)",
        setup.name, setup.provider, port, cli.baud
    );

    let mut session = Session::with_policy(transport, doc.policy.clone());
    run_phases(&mut session, setup, &phases, &message, out)
}

/// Run `phases` in order, writing each reply as `<phase>: <reply>`.
pub fn run_phases<T: Transport, D: Delay>(
    session: &mut Session<T, D>,
    setup: &Setup,
    phases: &[Phase],
    message: &[u8],
    out: &mut impl Write,
) -> AppResult<()> {
    for &phase in phases {
        for reply in session.run_phase(setup, phase, message)? {
            writeln!(out, "{phase}: {reply}").map_err(AppError::Output)?;
        }
    }
    Ok(())
}
