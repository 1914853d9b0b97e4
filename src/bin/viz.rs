use std::f32::consts::TAU;
use std::time::Duration;

use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke};
use egui_plot::{Line, Plot, PlotPoints};
use nalgebra::{Isometry3, Perspective3, Point3, Unit, UnitQuaternion, Vector3};
use rand::Rng;

use stardust::{BodyKind, Simulation, WorldConfig};

const NUM_STARS: usize = 1500;
const CAMERA_DISTANCE: f32 = 150.0;
const CAMERA_RISE: f32 = 20.0;
const CAMERA_RATE: f32 = 0.0005; // rad per tick
const FOV_Y_DEG: f32 = 45.0;
const MAX_TICKS_PER_FRAME: u32 = 8;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = StardustViz::new(Simulation::default());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Project Stardust: Satellite Deployment Mission",
        options,
        Box::new(|_| Ok(Box::new(app))),
    )
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

struct StardustViz {
    sim: Simulation,
    stars: Vec<Point3<f32>>,
    camera_angle: f32,
    accumulator: f32,
    trace: Vec<[f64; 2]>, // (time, height of the leading stage)
}

impl StardustViz {
    fn new(sim: Simulation) -> Self {
        let stars = starfield(&sim.world().center, NUM_STARS);
        Self {
            sim,
            stars,
            camera_angle: 0.0,
            accumulator: 0.0,
            trace: Vec::new(),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (launch, reset, quit) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::L),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if launch {
            self.sim.request_launch();
        }
        if reset {
            self.sim.reset();
            self.trace.clear();
        }
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    /// One fixed step of the mission plus the camera orbit.
    fn advance(&mut self) {
        let report = self.sim.step();
        if !report.phase.is_launched() {
            return;
        }

        self.camera_angle += CAMERA_RATE;
        if self.camera_angle > TAU {
            self.camera_angle -= TAU;
        }

        let stack = self.sim.stack();
        let lead = [BodyKind::UpperStage, BodyKind::Satellite, BodyKind::Booster]
            .into_iter()
            .map(|k| stack.body(k))
            .find(|b| b.visible);
        if let Some(body) = lead {
            let h = self.sim.world().height_of(&body.pos);
            self.trace.push([f64::from(self.sim.elapsed()), f64::from(h)]);
        }
    }

    fn draw_scene(&self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, Color32::from_rgb(0, 0, 5));

        let world = self.sim.world();
        let cam = Camera::new(self.camera_angle, &world.center, rect);

        for star in &self.stars {
            if let Some(p) = cam.project(star) {
                painter.circle_filled(p, 0.75, Color32::from_gray(230));
            }
        }

        let center = Point3::from(world.center);
        if let Some(p) = cam.project(&center) {
            let r = cam.pixels(&center, world.collision_radius);
            painter.circle_filled(p, r, Color32::from_rgb(35, 80, 160));
            painter.circle_stroke(p, r, Stroke::new(1.0, Color32::from_rgb(90, 150, 220)));
        }

        let stack = self.sim.stack();
        for (kind, body) in stack.visible() {
            let base = Point3::from(body.pos);
            match kind {
                BodyKind::Booster => {
                    let tumble = UnitQuaternion::from_axis_angle(
                        &Unit::new_normalize(Vector3::new(1.0, 0.0, 0.5)),
                        body.spin.to_radians(),
                    );
                    let up = tumble * Vector3::y();
                    cam.segment(&painter, base, base + up * 4.0, 1.6, Color32::from_gray(205));
                    if body.thrusting {
                        cam.segment(&painter, base, base - up * 2.0, 1.2, Color32::from_rgb(255, 150, 25));
                    }
                }
                BodyKind::UpperStage => {
                    let up = Vector3::y();
                    let top = base + up * 2.5;
                    cam.segment(&painter, base, top, 1.2, Color32::from_gray(205));
                    cam.segment(&painter, top, top + up, 0.8, Color32::RED);
                    if body.thrusting {
                        cam.segment(&painter, base, base - up * 1.5, 0.8, Color32::from_rgb(128, 205, 255));
                    }
                }
                BodyKind::Satellite => {
                    let span = Vector3::x() * 2.5;
                    cam.segment(&painter, base - span, base + span, 0.5, Color32::from_rgb(25, 25, 100));
                    if let Some(p) = cam.project(&base) {
                        painter.circle_filled(p, cam.pixels(&base, 0.5), Color32::from_rgb(230, 230, 25));
                    }
                }
            }
        }

        painter.text(
            rect.left_bottom() + egui::vec2(20.0, -20.0),
            Align2::LEFT_BOTTOM,
            self.sim.status(),
            FontId::proportional(18.0),
            Color32::WHITE,
        );
    }

    fn draw_telemetry(&self, ui: &mut egui::Ui) {
        let world = self.sim.world();
        ui.heading("Telemetry");
        ui.label(format!("Phase: {}", self.sim.phase()));
        ui.label(format!(
            "t = {:.2} s  (tick {})",
            self.sim.elapsed(),
            self.sim.tick_count()
        ));
        for (kind, body) in self.sim.stack().visible() {
            ui.label(format!(
                "{kind}: h={:.2}  v={:.2}{}",
                world.height_of(&body.pos),
                body.speed(),
                if body.thrusting { "  [burn]" } else { "" },
            ));
        }

        ui.separator();
        ui.label("Events");
        for e in self.sim.events().iter().rev().take(8) {
            ui.label(format!("#{:<6} {}", e.tick, e.kind));
        }

        ui.separator();
        ui.label("Height above center");
        let points: PlotPoints = self.trace.iter().copied().collect();
        Plot::new("height")
            .height(240.0)
            .x_axis_label("Time (s)")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new("Height", points));
            });

        ui.separator();
        ui.label("L: launch   R: reset   Esc: quit");
    }
}

impl eframe::App for StardustViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        let dt = self.sim.world().dt;
        self.accumulator += ctx.input(|i| i.stable_dt).min(0.25);
        let mut ticks = 0;
        while self.accumulator >= dt && ticks < MAX_TICKS_PER_FRAME {
            self.advance();
            self.accumulator -= dt;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            // Drop the backlog rather than spiral.
            self.accumulator = 0.0;
        }

        egui::SidePanel::right("telemetry")
            .min_width(320.0)
            .show(ctx, |ui| self.draw_telemetry(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_scene(ui));

        ctx.request_repaint_after(Duration::from_secs_f32(dt));
    }
}

// ---------------------------------------------------------------------------
// Orbiting camera
// ---------------------------------------------------------------------------

struct Camera {
    view: Isometry3<f32>,
    proj: Perspective3<f32>,
    rect: Rect,
    focal: f32, // pixels per unit at unit depth
}

impl Camera {
    fn new(angle: f32, center: &Vector3<f32>, rect: Rect) -> Self {
        let eye = Point3::new(
            CAMERA_DISTANCE * angle.sin(),
            center.y + CAMERA_RISE,
            CAMERA_DISTANCE * angle.cos(),
        );
        let target = Point3::from(*center);
        let view = Isometry3::look_at_rh(&eye, &target, &Vector3::y());

        let fovy = FOV_Y_DEG.to_radians();
        let aspect = rect.width() / rect.height().max(1.0);
        Self {
            view,
            proj: Perspective3::new(aspect, fovy, 1.0, 500.0),
            rect,
            focal: rect.height() * 0.5 / (fovy * 0.5).tan(),
        }
    }

    fn project(&self, p: &Point3<f32>) -> Option<Pos2> {
        let eye_space = self.view.transform_point(p);
        if eye_space.z > -1.0 {
            return None; // behind the near plane
        }
        let ndc = self.proj.project_point(&eye_space);
        let c = self.rect.center();
        Some(Pos2::new(
            c.x + ndc.x * self.rect.width() * 0.5,
            c.y - ndc.y * self.rect.height() * 0.5,
        ))
    }

    /// Screen size in pixels of a world length at `p`.
    fn pixels(&self, p: &Point3<f32>, length: f32) -> f32 {
        let depth = -self.view.transform_point(p).z;
        (length * self.focal / depth.max(1.0)).max(0.5)
    }

    fn segment(&self, painter: &Painter, a: Point3<f32>, b: Point3<f32>, width: f32, color: Color32) {
        if let (Some(pa), Some(pb)) = (self.project(&a), self.project(&b)) {
            let w = self.pixels(&a, width);
            painter.line_segment([pa, pb], Stroke::new(w, color));
        }
    }
}

/// Random stars on a spherical shell around the scene.
fn starfield(center: &Vector3<f32>, count: usize) -> Vec<Point3<f32>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let theta: f32 = rng.gen_range(0.0..TAU);
            let phi = rng.gen_range(-1.0_f32..=1.0).acos();
            let radius: f32 = rng.gen_range(150.0..200.0);
            Point3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin() + center.y + CAMERA_RISE,
                radius * phi.cos(),
            )
        })
        .collect()
}
