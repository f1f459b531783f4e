use crate::{
    background::tasks::RefreshSource, core::geo::Size, input::events::InputEvent, Result,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

/// A loaded background image, described by its natural size
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    pub size: Size,
    /// Monotonic counter supplied by the source, useful for cache busting
    pub revision: u64,
}

/// Supplies the background raster; decoding happens elsewhere
#[async_trait]
pub trait ImageSource: Send + Sync + 'static {
    async fn load(&self) -> Result<ImageFrame>;
}

/// Image of a known, fixed size
#[derive(Debug, Clone)]
pub struct StaticImageSource {
    size: Size,
}

impl StaticImageSource {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

#[async_trait]
impl ImageSource for StaticImageSource {
    async fn load(&self) -> Result<ImageFrame> {
        Ok(ImageFrame {
            size: self.size,
            revision: 0,
        })
    }
}

/// Polls an [`ImageSource`] and turns each frame into an `ImageReady` event.
///
/// Only the first successful load is flagged initial, so later refreshes
/// never re-fit the view.
pub struct ImageRefresh<S> {
    source: S,
    loaded: AtomicBool,
}

impl<S: ImageSource> ImageRefresh<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            loaded: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl<S: ImageSource> RefreshSource for ImageRefresh<S> {
    type Output = InputEvent;

    async fn fetch(&self) -> Result<InputEvent> {
        let frame = self.source.load().await?;
        let is_initial_load = !self.loaded.swap(true, Ordering::SeqCst);
        log::debug!(
            "image revision {} loaded ({}x{}, initial: {})",
            frame.revision,
            frame.size.width,
            frame.size.height,
            is_initial_load
        );
        Ok(InputEvent::ImageReady {
            size: frame.size,
            is_initial_load,
        })
    }

    fn name(&self) -> &str {
        "background-image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;
    use std::sync::atomic::AtomicUsize;

    struct FlakySource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageSource for FlakySource {
        async fn load(&self) -> Result<ImageFrame> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                return Err(MapError::Source("map.png not found".into()));
            }
            Ok(ImageFrame {
                size: Size::new(640.0, 480.0),
                revision: call as u64,
            })
        }
    }

    #[test]
    fn test_only_first_success_is_initial() {
        let refresh = ImageRefresh::new(FlakySource {
            calls: AtomicUsize::new(0),
        });

        futures::executor::block_on(async {
            assert!(refresh.fetch().await.is_err());
            assert_eq!(
                refresh.fetch().await.unwrap(),
                InputEvent::ImageReady {
                    size: Size::new(640.0, 480.0),
                    is_initial_load: true,
                }
            );
            assert_eq!(
                refresh.fetch().await.unwrap(),
                InputEvent::ImageReady {
                    size: Size::new(640.0, 480.0),
                    is_initial_load: false,
                }
            );
        });
    }

    #[test]
    fn test_static_source() {
        let source = StaticImageSource::new(Size::new(2000.0, 1000.0));
        let frame = futures::executor::block_on(source.load()).unwrap();
        assert_eq!(frame.size, Size::new(2000.0, 1000.0));
    }
}
