//! Two-asset orchestration and stream assembly

use efetch_errors::Error;
use efetch_stream::{archive_entries, compile, exclude, keep, merge, rename_to, EntryStream, FileEntry};
use efetch_types::{
    FetchRequest, Platform, ResolvedSpec, CODEC_ASSET, CODEC_FILE_GLOB, DARWIN_FFMPEG_PATH,
};
use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use glob::Pattern;

use crate::FetchContext;

/// How many entries may sit between a download task and the consumer
const CHANNEL_CAPACITY: usize = 16;

/// Fetch the runtime archive (and, when requested, the codec archive) and
/// return the merged stream of file entries.
///
/// Validation happens here, synchronously: a missing version or platform
/// fails before any event is emitted or any network activity starts. After
/// that the downloads run as independent spawned tasks; neither waits on
/// the other, and a failure in one surfaces as an `Err` item on its own
/// side of the merged stream while the other side keeps flowing.
///
/// When the codec is not requested its side is an empty stream, so the
/// merge has no special case.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns `FetchError::MissingVersion` / `FetchError::MissingPlatform`
/// when the request is incomplete. All later failures arrive in-band on
/// the returned stream.
pub fn fetch(ctx: &FetchContext, request: &FetchRequest) -> Result<EntryStream, Error> {
    let spec = request.resolve()?;
    let codec_pattern = compile(CODEC_FILE_GLOB)?;

    tracing::debug!(
        version = %spec.version,
        platform = %spec.platform,
        asset = %spec.asset_name,
        codec = request.ffmpeg_chromium,
        "starting fetch"
    );

    let main_stream = spawn_download(
        ctx.clone(),
        spec.clone(),
        MainAssembly {
            strip_codec: request.ffmpeg_chromium.then(|| codec_pattern.clone()),
        },
    );

    let codec_stream = if request.ffmpeg_chromium {
        spawn_download(
            ctx.clone(),
            spec.with_asset(CODEC_ASSET),
            CodecAssembly {
                pattern: codec_pattern,
                darwin: spec.platform == Platform::Darwin,
            },
        )
    } else {
        efetch_stream::empty()
    };

    Ok(merge(main_stream, codec_stream))
}

/// How a downloaded archive becomes this asset's entry stream
trait Assembly: Send + 'static {
    fn assemble(self, entries: EntryStream) -> EntryStream;
}

struct MainAssembly {
    /// Set when the codec ships separately and its files must not also
    /// come from the runtime archive
    strip_codec: Option<Pattern>,
}

impl Assembly for MainAssembly {
    fn assemble(self, entries: EntryStream) -> EntryStream {
        match self.strip_codec {
            Some(pattern) => exclude(entries, pattern),
            None => entries,
        }
    }
}

struct CodecAssembly {
    pattern: Pattern,
    darwin: bool,
}

impl Assembly for CodecAssembly {
    fn assemble(self, entries: EntryStream) -> EntryStream {
        let kept = keep(entries, self.pattern);
        if self.darwin {
            // The codec library lives inside the app bundle on darwin
            rename_to(kept, DARWIN_FFMPEG_PATH)
        } else {
            kept
        }
    }
}

/// Run one download as an independent task feeding a channel-backed stream.
///
/// The task downloads into its own staging directory, assembles the archive
/// into entries, and forwards them until exhausted. Any failure is sent as
/// a single `Err` item and ends the stream. The staging directory lives
/// until the archive has been fully read.
fn spawn_download<A: Assembly>(
    ctx: FetchContext,
    spec: ResolvedSpec,
    assembly: A,
) -> EntryStream {
    let (mut tx, rx) = mpsc::channel::<Result<FileEntry, Error>>(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let staging = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                let _ = tx.send(Err(e.into())).await;
                return;
            }
        };

        let archive = match efetch_net::download_asset(
            &ctx.client,
            &spec,
            &ctx.mirror,
            staging.path(),
            &ctx.tx,
        )
        .await
        {
            Ok(path) => path,
            Err(error) => {
                let _ = tx.send(Err(error)).await;
                return;
            }
        };

        let mut entries = assembly.assemble(archive_entries(archive));
        while let Some(item) = entries.next().await {
            if tx.send(item).await.is_err() {
                // Consumer hung up; stop forwarding
                break;
            }
        }

        drop(staging);
    });

    rx.boxed()
}
