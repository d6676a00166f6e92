//! Sequential processing of one drop event.

use crate::destination::resolve_destination;
use crate::encoder::{FileSource, encode};
use crate::error::{Error, Result};
use crate::messages::batch_error_message;
use crate::parent::resolve_parent;
use crate::session::SessionTracker;
use crate::types::{BatchReport, Destination, Event, RecordProps};

use super::AttachmentUploader;

/// Resets the session when the batch ends, including when the future is dropped
struct SessionGuard<'a>(&'a SessionTracker);

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.0.reset();
    }
}

impl AttachmentUploader {
    /// Upload the files of one drop event, strictly one after another
    ///
    /// Each file is encoded, its parent record and destination resolved, and
    /// submitted before the next file is read. The first failure stops the
    /// batch: later files are not attempted and earlier ones stay uploaded.
    /// Whatever happens, the session is reset, the refresh target (if any) is
    /// refreshed, and a failure is reported once through
    /// [`HostContext::report_error`](crate::HostContext::report_error).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BatchInProgress`] if another batch is still running;
    /// the running batch is not affected. Per-file failures are not returned
    /// as errors but carried in [`BatchReport::error`].
    pub async fn upload_batch(
        &self,
        props: &RecordProps,
        files: &[Box<dyn FileSource>],
    ) -> Result<BatchReport> {
        let total = files.len();
        if let Err(e) = self.session.begin(total) {
            tracing::warn!(total, "rejecting drop while a batch is uploading");
            return Err(e);
        }

        let (uploaded, failure) = {
            let _guard = SessionGuard(&self.session);
            self.event_tx.send(Event::BatchStarted { total }).ok();
            tracing::info!(total, entity = %props.entity_name, "upload batch started");
            self.run_files(props, files).await
        };

        if let Some(control) = self.config.refresh_target() {
            self.host.refresh_control(control);
            self.event_tx
                .send(Event::Refreshed {
                    control: control.to_string(),
                })
                .ok();
        }

        let error = failure.map(|(attempted, e)| {
            let message = batch_error_message(self.host.as_ref(), total, &e);
            self.host.report_error(&message);
            self.event_tx
                .send(Event::BatchFailed {
                    attempted,
                    kind: e.kind(),
                    message: message.clone(),
                })
                .ok();
            message
        });

        tracing::info!(total, uploaded, failed = error.is_some(), "upload batch finished");
        self.event_tx
            .send(Event::BatchFinished { uploaded, total })
            .ok();

        Ok(BatchReport {
            total,
            uploaded,
            error,
        })
    }

    /// Returns the number of uploaded files and, on failure, the attempted count and error
    async fn run_files(
        &self,
        props: &RecordProps,
        files: &[Box<dyn FileSource>],
    ) -> (usize, Option<(usize, Error)>) {
        let total = files.len();
        let mut uploaded = 0;

        for (index, file) in files.iter().enumerate() {
            self.session.advance(index);
            self.event_tx
                .send(Event::FileStarted {
                    index,
                    total,
                    name: file.name().to_string(),
                })
                .ok();

            match self.upload_file(props, file.as_ref()).await {
                Ok(destination) => {
                    uploaded += 1;
                    self.event_tx
                        .send(Event::FileUploaded {
                            index,
                            name: file.name().to_string(),
                            destination,
                        })
                        .ok();
                }
                Err(e) => {
                    tracing::warn!(
                        index,
                        name = file.name(),
                        error = %e,
                        skipped = total - index - 1,
                        "upload failed, stopping batch"
                    );
                    return (uploaded, Some((index + 1, e)));
                }
            }
        }

        (uploaded, None)
    }

    async fn upload_file(&self, props: &RecordProps, file: &dyn FileSource) -> Result<Destination> {
        let descriptor = encode(file).await?;
        // Re-resolved per file: the form may publish the new record mid-batch.
        let parent = resolve_parent(props, self.host.current_record())?;
        let destination =
            resolve_destination(&self.config, self.host.as_ref(), &parent.entity_name);

        self.transport
            .submit(&descriptor, &destination, &parent)
            .await?;

        tracing::debug!(
            name = descriptor.name(),
            destination = destination.label(),
            parent = %parent.entity_id,
            "file uploaded"
        );
        Ok(destination)
    }
}
