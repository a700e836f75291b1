use eframe::egui::{pos2, vec2, Color32, Pos2, Sense, Shape, Stroke, Widget};

use crate::sketch::{Path, Point, BOARD_HEIGHT, BOARD_WIDTH, STROKE_WIDTH};

/// the drawing board: a white rect the user drags lines onto
///
/// the board is displayed as wide as the available space allows (up to its
/// logical size) at a fixed 3:2 aspect; pointer positions are scaled from the
/// displayed rect into logical board pixels before they are recorded, so a
/// line's length does not depend on how big the window is
pub struct Sketchpad<'a> {
    path: &'a mut Path,
}

impl<'a> Sketchpad<'a> {
    pub fn new(path: &'a mut Path) -> Self {
        Self { path }
    }
}

impl Widget for Sketchpad<'_> {
    fn ui(self, ui: &mut eframe::egui::Ui) -> eframe::egui::Response {
        let width = ui.available_width().min(BOARD_WIDTH);
        let (rect, mut response) = ui.allocate_exact_size(
            vec2(width, width * BOARD_HEIGHT / BOARD_WIDTH),
            Sense::click_and_drag(),
        );
        // displayed pixels to logical board pixels and back
        let scale = BOARD_WIDTH / rect.width();
        let to_board =
            |pos: Pos2| Point::new((pos.x - rect.min.x) * scale, (pos.y - rect.min.y) * scale);
        let to_screen =
            |point: &Point| pos2(rect.min.x + point.x / scale, rect.min.y + point.y / scale);

        if let Some(pos) = response.interact_pointer_pos() {
            if response.drag_started() || response.clicked() {
                self.path.begin(to_board(pos));
                response.mark_changed();
            } else if response.dragged() {
                self.path.push(to_board(pos));
                response.mark_changed();
            }
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::WHITE);
        let ink = Stroke::new(STROKE_WIDTH / scale, Color32::BLACK);
        let points: Vec<Pos2> = self.path.points().iter().map(to_screen).collect();
        if points.len() > 1 {
            painter.add(Shape::line(points.clone(), ink));
        }
        // round caps/joins
        for point in points {
            painter.circle_filled(point, ink.width / 2.0, Color32::BLACK);
        }
        painter.rect_stroke(rect, 0.0, Stroke::new(2.0, Color32::DARK_GRAY));
        response
    }
}
