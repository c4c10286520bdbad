//! Contact and design request commands.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use printease_commerce::forms::{ContactForm, DesignFile, DesignRequest};
use printease_commerce::session::SessionSignal;

use super::{drive_until, ContactArgs, DesignArgs};
use crate::context::Context;
use crate::output::{format_bytes, NotificationLog};

/// Run the contact command.
pub async fn contact(args: ContactArgs, ctx: &Context) -> Result<()> {
    let form = ContactForm {
        name: args.name,
        email: args.email,
        subject: args.subject,
        message: args.message,
    };

    let mut session = ctx.open_session()?;
    let mut log = NotificationLog::default();
    let submitted = session.submit_contact(&form);
    log.show_new(&ctx.output, session.notifications());
    submitted.context("Message not sent")?;

    let signals = drive_until(&mut session, &ctx.output, &mut log, args.no_wait, |_, seen| {
        seen.contains(&SessionSignal::ContactSent)
    })
    .await;

    if !signals.contains(&SessionSignal::ContactSent) {
        bail!("Message was not acknowledged");
    }
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "sent": true, "contact": form }));
    }
    Ok(())
}

/// Run the design command.
pub async fn design(args: DesignArgs, ctx: &Context) -> Result<()> {
    let file = args.file.as_deref().map(describe_file).transpose()?;
    if let Some(file) = &file {
        ctx.output
            .debug(&format!("Uploading {} ({})", file.name, format_bytes(file.size_bytes)));
    }

    let request = DesignRequest {
        item_type: args.item_type,
        quantity: args.quantity,
        notes: args.notes,
        email: args.email,
        file,
    };

    let mut session = ctx.open_session()?;
    let mut log = NotificationLog::default();
    let submitted = session.submit_design(&request);
    log.show_new(&ctx.output, session.notifications());
    submitted.context("Design request not sent")?;

    let signals = drive_until(&mut session, &ctx.output, &mut log, args.no_wait, |_, seen| {
        seen.contains(&SessionSignal::DesignRequestSent)
    })
    .await;

    if !signals.contains(&SessionSignal::DesignRequestSent) {
        bail!("Design request was not acknowledged");
    }
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "sent": true, "request": request }));
    }
    Ok(())
}

fn describe_file(path: &str) -> Result<DesignFile> {
    let path = Path::new(path);
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot read design file: {}", path.display()))?;
    if !metadata.is_file() {
        bail!("Not a file: {}", path.display());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(DesignFile {
        name,
        size_bytes: metadata.len(),
    })
}
