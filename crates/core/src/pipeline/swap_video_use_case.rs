//! Second pass over a stream: swap every cached face and write the
//! composited frames out.

use crate::error::SwapError;
use crate::video::domain::frame_reader::FrameReader;
use crate::video::domain::frame_writer::FrameWriter;

use super::face_swapper::FaceSwapper;
use super::pipeline_logger::PipelineLogger;
use super::stream_session::StreamSession;

/// Replays the session's face cache against the stream in decode order,
/// one cache entry per frame, writing each composited frame as it is
/// produced.
///
/// Cache or replacement exhaustion aborts the stream with the error
/// surfaced; frames already written stay written.
pub struct SwapVideoUseCase {
    swapper: FaceSwapper,
}

impl SwapVideoUseCase {
    pub fn new(swapper: FaceSwapper) -> Self {
        Self { swapper }
    }

    /// Returns the number of frames written.
    pub fn execute(
        &self,
        reader: &mut dyn FrameReader,
        writer: &mut dyn FrameWriter,
        session: &mut StreamSession,
        logger: &mut dyn PipelineLogger,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let total = session.cached_frames();
        let mut written = 0usize;

        let result = (|| -> Result<(), Box<dyn std::error::Error>> {
            for item in reader.frames() {
                let frame = item?;
                let faces = session.faces_for(frame.index())?;
                let out = self
                    .swapper
                    .swap_frame(&frame, &faces, session.source_mut())?;
                writer.write(&out)?;
                written += 1;
                logger.progress(written, total);
            }
            Ok(())
        })();

        reader.close();
        let close_result = writer.close();
        result?;
        close_result?;

        logger.summary();
        Ok(written)
    }
}

/// Convenience check used by callers that want to distinguish a fatal
/// exhaustion from collaborator I/O errors.
pub fn is_stream_exhaustion(error: &(dyn std::error::Error + 'static)) -> bool {
    matches!(
        error.downcast_ref::<SwapError>(),
        Some(
            SwapError::FaceCacheExhausted { .. } | SwapError::ReplacementSourceExhausted { .. }
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_cache::FaceCache;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::pipeline::swap_config::SwapConfig;
    use crate::shared::frame::Frame;
    use crate::synthesis::domain::face_source::FaceSource;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct StubReader {
        frames: Vec<Frame>,
    }

    impl FrameReader for StubReader {
        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frames.drain(..).map(Ok))
        }

        fn close(&mut self) {}
    }

    struct StubWriter {
        written: Arc<Mutex<Vec<Frame>>>,
        closed: Arc<Mutex<bool>>,
    }

    impl StubWriter {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
                closed: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl FrameWriter for StubWriter {
        fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written.lock().unwrap().push(frame.clone());
            Ok(())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
    }

    struct QueueSource {
        faces: VecDeque<Frame>,
    }

    impl FaceSource for QueueSource {
        fn next_face(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            Ok(self.faces.pop_front())
        }
    }

    fn make_frame(index: usize) -> Frame {
        Frame::new(vec![128; 100 * 100 * 3], 100, 100, 3, index)
    }

    fn session_for(frame_count: usize) -> StreamSession {
        let mut cache = FaceCache::new();
        for _ in 0..frame_count {
            cache.push_frame(vec![]);
        }
        StreamSession::new(
            cache,
            Box::new(QueueSource {
                faces: VecDeque::new(),
            }),
        )
    }

    #[test]
    fn test_writes_all_frames_in_order() {
        let uc = SwapVideoUseCase::new(FaceSwapper::new(&SwapConfig::default()));
        let mut reader = StubReader {
            frames: (0..5).map(make_frame).collect(),
        };
        let writer = StubWriter::new();
        let written = writer.written.clone();
        let mut writer: Box<dyn FrameWriter> = Box::new(writer);
        let mut session = session_for(5);

        let count = uc
            .execute(
                &mut reader,
                writer.as_mut(),
                &mut session,
                &mut NullPipelineLogger,
            )
            .unwrap();

        assert_eq!(count, 5);
        let written = written.lock().unwrap();
        for (i, frame) in written.iter().enumerate() {
            assert_eq!(frame.index(), i);
        }
    }

    #[test]
    fn test_faceless_frames_pass_through_unchanged() {
        let uc = SwapVideoUseCase::new(FaceSwapper::new(&SwapConfig::default()));
        let mut reader = StubReader {
            frames: vec![make_frame(0)],
        };
        let writer = StubWriter::new();
        let written = writer.written.clone();
        let mut writer: Box<dyn FrameWriter> = Box::new(writer);
        let mut session = session_for(1);

        uc.execute(
            &mut reader,
            writer.as_mut(),
            &mut session,
            &mut NullPipelineLogger,
        )
        .unwrap();

        assert_eq!(written.lock().unwrap()[0].data(), make_frame(0).data());
    }

    #[test]
    fn test_cache_exhaustion_aborts_but_keeps_written_frames() {
        let uc = SwapVideoUseCase::new(FaceSwapper::new(&SwapConfig::default()));
        // Three stream frames, only two cached entries
        let mut reader = StubReader {
            frames: (0..3).map(make_frame).collect(),
        };
        let writer = StubWriter::new();
        let written = writer.written.clone();
        let closed = writer.closed.clone();
        let mut writer: Box<dyn FrameWriter> = Box::new(writer);
        let mut session = session_for(2);

        let err = uc
            .execute(
                &mut reader,
                writer.as_mut(),
                &mut session,
                &mut NullPipelineLogger,
            )
            .unwrap_err();

        assert!(is_stream_exhaustion(err.as_ref()));
        assert_eq!(written.lock().unwrap().len(), 2);
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn test_empty_stream_writes_nothing() {
        let uc = SwapVideoUseCase::new(FaceSwapper::new(&SwapConfig::default()));
        let mut reader = StubReader { frames: vec![] };
        let writer = StubWriter::new();
        let written = writer.written.clone();
        let mut writer: Box<dyn FrameWriter> = Box::new(writer);
        let mut session = session_for(0);

        let count = uc
            .execute(
                &mut reader,
                writer.as_mut(),
                &mut session,
                &mut NullPipelineLogger,
            )
            .unwrap();
        assert_eq!(count, 0);
        assert!(written.lock().unwrap().is_empty());
    }
}
