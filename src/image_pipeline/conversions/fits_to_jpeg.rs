use std::io::Write;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{info, instrument};

use crate::image_pipeline::{
    annotate::{CaptionLayout, GlyphRenderer, TextRenderer, caption_lines, draw_caption},
    common::error::{ConversionError, Result},
    common::timing::{PipelineTimings, Timer},
    compose::compose_rgb,
    config::ConversionConfig,
    fits::{CHANNEL_NAMES, CubeReader, FitsioReader, RawCube},
    jpeg::{JpegWriter, StandardJpegWriter},
    meta::CaptionMeta,
    observation::Observation,
    stretch::{NormalizedPlane, normalize_plane},
    tags::{ExifEncoder, TagEncoder, build_tag_block},
};

/// Output file name: `<author>_<YYYY-MM>_<idName, spaces as hyphens>_annoted.jpg`.
pub fn output_file_name(meta: &CaptionMeta, observation: &Observation) -> String {
    format!(
        "{}_{}_{}_annoted.jpg",
        meta.author,
        observation.date_obs.format("%Y-%m"),
        meta.id_name.replace(' ', "-")
    )
}

pub struct FitsToJpegPipeline<R: CubeReader, T: TextRenderer, E: TagEncoder, W: JpegWriter> {
    reader: R,
    renderer: T,
    encoder: E,
    writer: W,
    config: ConversionConfig,
}

impl FitsToJpegPipeline<FitsioReader, GlyphRenderer, ExifEncoder, StandardJpegWriter> {
    /// Fails with [`ConversionError::FontResource`] if the configured font cannot be loaded.
    pub fn new(config: ConversionConfig) -> Result<Self> {
        let renderer = GlyphRenderer::from_config(&config)?;
        Ok(Self {
            reader: FitsioReader,
            renderer,
            encoder: ExifEncoder,
            writer: StandardJpegWriter,
            config,
        })
    }
}

impl<R: CubeReader, T: TextRenderer, E: TagEncoder, W: JpegWriter> FitsToJpegPipeline<R, T, E, W> {
    pub fn with_custom(reader: R, renderer: T, encoder: E, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            renderer,
            encoder,
            writer,
            config,
        }
    }

    /// Stretches, composes and captions `cube` without encoding it.
    pub fn render(&self, cube: &RawCube, meta: &CaptionMeta) -> Result<RgbImage> {
        let observation = Observation::from_header(&cube.header)?;
        let mut timings = PipelineTimings::new();
        self.render_timed(cube, &observation, meta, &mut timings)
    }

    #[instrument(skip(self, cube, meta, output))]
    pub fn convert(&self, cube: &RawCube, meta: &CaptionMeta, output: &mut dyn Write) -> Result<()> {
        let observation = Observation::from_header(&cube.header)?;
        let mut timings = PipelineTimings::new();
        self.convert_timed(cube, &observation, meta, output, &mut timings)?;
        timings.log_summary();
        Ok(())
    }

    /// Converts `input_path` using the caption metadata in `meta_path` and
    /// returns the path of the written JPEG.
    ///
    /// The JPEG is encoded in memory first; the output file is only created
    /// once every step has succeeded.
    #[instrument(skip(self, input_path, meta_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        meta_path: Q,
    ) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        let meta_path = meta_path.as_ref();
        let mut timings = PipelineTimings::new();

        info!(
            input = %input_path.display(),
            meta = %meta_path.display(),
            "Converting file"
        );

        let cube = {
            let _span = tracing::info_span!("read_fits").entered();
            let timer = Timer::start("read_fits");
            let cube = self.reader.read_cube(input_path)?;
            timings.record(timer);
            cube
        };

        let meta = CaptionMeta::from_file(meta_path)?;
        let observation = Observation::from_header(&cube.header)?;
        let output_path = self
            .config
            .output_dir
            .join(output_file_name(&meta, &observation));

        let mut buffer = Vec::new();
        self.convert_timed(&cube, &observation, &meta, &mut buffer, &mut timings)?;

        {
            let _span = tracing::info_span!("write_output", path = %output_path.display()).entered();
            let timer = Timer::start("write_output");
            std::fs::write(&output_path, &buffer).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
            timings.record(timer);
        }

        timings.log_summary();
        info!(output = %output_path.display(), bytes = buffer.len(), "Conversion complete");
        Ok(output_path)
    }

    fn render_timed(
        &self,
        cube: &RawCube,
        observation: &Observation,
        meta: &CaptionMeta,
        timings: &mut PipelineTimings,
    ) -> Result<RgbImage> {
        let planes: Vec<NormalizedPlane> = {
            let _span = tracing::info_span!("normalize").entered();
            let timer = Timer::start("normalize");
            let planes = cube
                .planes()
                .iter()
                .zip(CHANNEL_NAMES)
                .map(|(plane, channel)| normalize_plane(plane, channel))
                .collect();
            timings.record(timer);
            planes
        };

        let mut image = {
            let _span = tracing::info_span!("compose").entered();
            let timer = Timer::start("compose");
            let image = compose_rgb([&planes[0], &planes[1], &planes[2]])?;
            timings.record(timer);
            image
        };

        {
            let _span = tracing::info_span!("annotate").entered();
            let timer = Timer::start("annotate");
            let lines = caption_lines(observation, meta);
            draw_caption(
                &mut image,
                &lines,
                &self.renderer,
                &CaptionLayout::from_config(&self.config),
            );
            timings.record(timer);
        }

        Ok(image)
    }

    fn convert_timed(
        &self,
        cube: &RawCube,
        observation: &Observation,
        meta: &CaptionMeta,
        output: &mut dyn Write,
        timings: &mut PipelineTimings,
    ) -> Result<()> {
        let image = self.render_timed(cube, observation, meta, timings)?;

        let tags = {
            let _span = tracing::info_span!("encode_tags").entered();
            let timer = Timer::start("encode_tags");
            let block = build_tag_block(observation, meta)?;
            let tags = self.encoder.encode(&block)?;
            timings.record(timer);
            tags
        };

        {
            let _span = tracing::info_span!("encode_jpeg").entered();
            let timer = Timer::start("encode_jpeg");
            self.writer
                .write_jpeg(&image, Some(&tags), output, &self.config)?;
            timings.record(timer);
        }

        info!(
            width = image.width(),
            height = image.height(),
            "Annotated image encoded"
        );
        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}
