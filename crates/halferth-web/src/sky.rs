use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use halferth_sim::sky::{
    DAUGHTER_CLIP_SCALE, DAUGHTER_SPRITE_SIZE, MOTHER_CLIP_SCALE, MOTHER_SPRITE_SIZE,
};
use halferth_sim::{place_moon, HorizonArc, SharedState, SpritePlacement, VisibilityWindow};

use std::f64::consts::{FRAC_PI_2, TAU};

/// Draws the sky overlay on its own frame loop: moon sprites along the
/// horizon arc, then the horizon image on top.
///
/// Reads the shared record as a snapshot each frame; it never writes it.
/// All image sources are optional — drawing before they are ready is a
/// no-op, not an error.
pub struct SkyRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    mother_window: VisibilityWindow,
    daughter_window: VisibilityWindow,
    mother_source: Option<HtmlCanvasElement>,
    daughter_source: Option<HtmlCanvasElement>,
    horizon: Option<HtmlImageElement>,
}

impl SkyRenderer {
    pub fn new(
        canvas: HtmlCanvasElement,
        mother_eccentricity: f64,
        daughter_eccentricity: f64,
    ) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            mother_window: VisibilityWindow::from_eccentricity(mother_eccentricity),
            daughter_window: VisibilityWindow::from_eccentricity(daughter_eccentricity),
            mother_source: None,
            daughter_source: None,
            horizon: None,
        })
    }

    pub fn set_sources(
        &mut self,
        mother: HtmlCanvasElement,
        daughter: HtmlCanvasElement,
        horizon: HtmlImageElement,
    ) {
        self.mother_source = Some(mother);
        self.daughter_source = Some(daughter);
        self.horizon = Some(horizon);
    }

    /// Draw one overlay frame from a snapshot of the shared record.
    pub fn draw(&self, shared: &SharedState) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, width, height);

        let arc = HorizonArc::for_canvas(width, height);
        self.stroke_arc_guide(&arc)?;

        if let Some(p) = place_moon(
            shared.mother.orbital_angle,
            shared.mother.sky_angle_deg,
            &self.mother_window,
            &arc,
        ) {
            self.draw_moon(
                self.mother_source.as_ref(),
                &p,
                MOTHER_SPRITE_SIZE,
                MOTHER_CLIP_SCALE,
            )?;
        }

        if let Some(p) = place_moon(
            shared.daughter.orbital_angle,
            shared.daughter.sky_angle_deg,
            &self.daughter_window,
            &arc,
        ) {
            self.draw_moon(
                self.daughter_source.as_ref(),
                &p,
                DAUGHTER_SPRITE_SIZE,
                DAUGHTER_CLIP_SCALE,
            )?;
        }

        // Horizon goes last so it occludes moons low in the sky.
        self.draw_horizon(width, height)
    }

    fn stroke_arc_guide(&self, arc: &HorizonArc) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.ellipse(
            arc.center_x,
            arc.center_y,
            arc.radius_x,
            arc.radius_y,
            0.0,
            0.0,
            TAU,
        )?;
        self.ctx.set_stroke_style_str("rgba(255, 255, 255, 0.25)");
        self.ctx.set_line_width(1.0);
        self.ctx.stroke();
        Ok(())
    }

    /// One moon sprite: mirror, roll, circular clip, blit.
    fn draw_moon(
        &self,
        source: Option<&HtmlCanvasElement>,
        placement: &SpritePlacement,
        size: f64,
        clip_scale: f64,
    ) -> Result<(), JsValue> {
        let Some(source) = source else {
            return Ok(());
        };
        if source.width() == 0 || source.height() == 0 {
            return Ok(());
        }
        let radius = size / 2.0;
        self.ctx.save();
        let result = (|| -> Result<(), JsValue> {
            self.ctx.translate(placement.x, placement.y)?;
            self.ctx.scale(-1.0, 1.0)?;
            self.ctx.rotate(placement.roll + 3.0 * FRAC_PI_2)?;
            self.ctx.begin_path();
            self.ctx.arc(0.0, 0.0, radius * clip_scale, 0.0, TAU)?;
            self.ctx.clip();
            self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                source, -radius, -radius, size, size,
            )
        })();
        self.ctx.restore();
        result
    }

    fn draw_horizon(&self, width: f64, height: f64) -> Result<(), JsValue> {
        let Some(img) = &self.horizon else {
            return Ok(());
        };
        if !img.complete() || img.natural_width() == 0 || img.natural_height() == 0 {
            return Ok(());
        }
        let scaled_height = width * (img.natural_height() as f64 / img.natural_width() as f64);
        self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            0.0,
            height - scaled_height,
            width,
            scaled_height,
        )
    }
}
