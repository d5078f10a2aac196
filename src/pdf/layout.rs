use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

use super::fonts::{Face, encode_win_ansi, wrap};
use super::model::{DocumentModel, ItemRow};
use crate::core::{InvoiceError, PageSetup, mm_to_pt};

const HEADING_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;
const SMALL_SIZE: f32 = 9.0;
const LEADING: f32 = 1.2;
const CELL_PAD: f32 = 3.0;
const HEADER_PAD: f32 = 6.0;
const HEADER_GRAY: f32 = 0.827;
const GRID_GRAY: f32 = 0.5;
const GRID_WIDTH: f32 = 0.25;
const ITEM_HEADER_HEIGHT: f32 = TABLE_SIZE * LEADING + 2.0 * HEADER_PAD;

const META_COLUMNS_MM: [f32; 4] = [30.0, 60.0, 20.0, 40.0];
const ITEM_COLUMNS_MM: [f32; 4] = [85.0, 15.0, 35.0, 35.0];

/// Lay out `model` on pages of `setup` and serialize the PDF.
pub fn render_pdf(model: &DocumentModel, setup: &PageSetup) -> Result<Vec<u8>, InvoiceError> {
    let mut canvas = Canvas::new(*setup);

    canvas.paragraph(&model.letterhead.company, Face::Bold, HEADING_SIZE);
    canvas.spacer(6.0);
    canvas.paragraph(&model.letterhead.tagline, Face::Regular, BODY_SIZE);
    canvas.spacer(6.0);

    metadata_table(&mut canvas, &model.metadata);
    canvas.spacer(8.0);

    canvas.paragraph("Bill To:", Face::Bold, BODY_SIZE);
    for line in &model.bill_to {
        canvas.paragraph(line, Face::Regular, BODY_SIZE);
    }
    canvas.spacer(12.0);

    item_table(&mut canvas, model);
    canvas.spacer(12.0);

    if let Some(notes) = &model.notes {
        canvas.paragraph("Notes", Face::Bold, BODY_SIZE);
        canvas.paragraph(notes, Face::Regular, SMALL_SIZE);
        canvas.spacer(6.0);
    }

    for line in &model.footer {
        canvas.paragraph(line, Face::Regular, SMALL_SIZE);
    }

    assemble(canvas.finish(), &model.title, setup)
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// Accumulates drawing operations page by page, top to bottom.
struct Canvas {
    setup: PageSetup,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl Canvas {
    fn new(setup: PageSetup) -> Self {
        let mut canvas = Self {
            setup,
            pages: Vec::new(),
            ops: Vec::new(),
            y: 0.0,
        };
        canvas.begin_page();
        canvas
    }

    fn top(&self) -> f32 {
        self.setup.height_pt - self.setup.margin_pt()
    }

    fn bottom(&self) -> f32 {
        self.setup.margin_pt()
    }

    fn left(&self) -> f32 {
        self.setup.margin_pt()
    }

    fn width(&self) -> f32 {
        self.setup.width_pt - 2.0 * self.setup.margin_pt()
    }

    fn begin_page(&mut self) {
        self.y = self.top();
        self.ops.push(Operation::new("w", vec![Object::Real(GRID_WIDTH)]));
        self.ops.push(Operation::new("G", vec![Object::Real(GRID_GRAY)]));
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.ops);
        self.pages.push(finished);
        self.begin_page();
    }

    /// Break to a new page if `height` does not fit below the cursor.
    /// Never breaks an empty page. Returns true if a break happened.
    fn reserve(&mut self, height: f32) -> bool {
        if self.y - height < self.bottom() && self.y < self.top() {
            self.new_page();
            return true;
        }
        false
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn spacer(&mut self, dy: f32) {
        if self.y - dy < self.bottom() {
            self.new_page();
        } else {
            self.y -= dy;
        }
    }

    fn paragraph(&mut self, text: &str, face: Face, size: f32) {
        let leading = size * LEADING;
        let (left, width) = (self.left(), self.width());
        for line in wrap(text, face, size, width) {
            self.reserve(leading);
            let baseline = self.y - size;
            self.text(face, size, left, baseline, &line);
            self.advance(leading);
        }
    }

    fn text(&mut self, face: Face, size: f32, x: f32, baseline: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(face.resource_name().as_bytes().to_vec()),
                Object::Real(size),
            ],
        ));
        self.ops.push(Operation::new(
            "Td",
            vec![Object::Real(x), Object::Real(baseline)],
        ));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    #[allow(clippy::too_many_arguments)]
    fn cell_text(
        &mut self,
        face: Face,
        size: f32,
        x: f32,
        width: f32,
        baseline: f32,
        text: &str,
        align: Align,
    ) {
        let text_width = face.text_width(text, size);
        let tx = match align {
            Align::Left => x + CELL_PAD,
            Align::Center => x + (width - text_width) / 2.0,
            Align::Right => x + width - CELL_PAD - text_width,
        };
        self.text(face, size, tx, baseline, text);
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Operation::new(
            "re",
            vec![
                Object::Real(x),
                Object::Real(y),
                Object::Real(w),
                Object::Real(h),
            ],
        ));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, gray: f32) {
        self.ops.push(Operation::new("g", vec![Object::Real(gray)]));
        self.rect(x, y, w, h);
        self.ops.push(Operation::new("f", vec![]));
        self.ops.push(Operation::new("g", vec![Object::Integer(0)]));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.rect(x, y, w, h);
        self.ops.push(Operation::new("S", vec![]));
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        // Drop a trailing page that only carries the graphics-state preamble.
        if self.ops.len() > 2 || self.pages.is_empty() {
            self.pages.push(self.ops);
        }
        self.pages
    }
}

fn column_edges(widths_mm: [f32; 4], left: f32) -> ([f32; 4], [f32; 4]) {
    let widths = widths_mm.map(mm_to_pt);
    let mut xs = [left; 4];
    for i in 1..4 {
        xs[i] = xs[i - 1] + widths[i - 1];
    }
    (xs, widths)
}

fn metadata_table(canvas: &mut Canvas, rows: &[[String; 4]]) {
    let (xs, widths) = column_edges(META_COLUMNS_MM, canvas.left());
    let height = BODY_SIZE * LEADING + 2.0 * CELL_PAD;
    for row in rows {
        canvas.reserve(height);
        let baseline = canvas.y - CELL_PAD - BODY_SIZE;
        for (i, cell) in row.iter().enumerate() {
            canvas.cell_text(
                Face::Regular,
                BODY_SIZE,
                xs[i],
                widths[i],
                baseline,
                cell,
                Align::Left,
            );
        }
        canvas.advance(height);
    }
}

fn item_header(canvas: &mut Canvas, header: &[String; 4], xs: &[f32; 4], widths: &[f32; 4]) {
    let height = ITEM_HEADER_HEIGHT;
    canvas.reserve(height);
    let bottom = canvas.y - height;
    let total_width: f32 = widths.iter().sum();
    canvas.fill_rect(xs[0], bottom, total_width, height, HEADER_GRAY);
    let baseline = canvas.y - HEADER_PAD - TABLE_SIZE;
    for i in 0..4 {
        canvas.stroke_rect(xs[i], bottom, widths[i], height);
        canvas.cell_text(
            Face::Bold,
            TABLE_SIZE,
            xs[i],
            widths[i],
            baseline,
            &header[i],
            Align::Left,
        );
    }
    canvas.advance(height);
}

fn item_table(canvas: &mut Canvas, model: &DocumentModel) {
    let (xs, widths) = column_edges(ITEM_COLUMNS_MM, canvas.left());
    let leading = TABLE_SIZE * LEADING;

    item_header(canvas, &model.header, &xs, &widths);

    // Rows taller than a page are continued on the next one.
    let page_room = canvas.top() - canvas.bottom() - ITEM_HEADER_HEIGHT;
    for row in &model.rows {
        let description = wrap(
            &row.description,
            Face::Regular,
            TABLE_SIZE,
            widths[0] - 2.0 * CELL_PAD,
        );
        let height = description.len() as f32 * leading + 2.0 * CELL_PAD;
        let needed = if height <= page_room {
            height
        } else {
            leading + 2.0 * CELL_PAD
        };
        if canvas.reserve(needed) {
            item_header(canvas, &model.header, &xs, &widths);
        }

        let mut lines = description.as_slice();
        let mut amounts = Some(row);
        loop {
            let room = canvas.y - canvas.bottom() - 2.0 * CELL_PAD;
            let fit = ((room / leading + 1e-3).floor().max(1.0) as usize).min(lines.len());
            let (chunk, rest) = lines.split_at(fit);
            item_row(canvas, &xs, &widths, chunk, amounts.take());
            lines = rest;
            if lines.is_empty() {
                break;
            }
            canvas.new_page();
            item_header(canvas, &model.header, &xs, &widths);
        }
    }

    // Summary rows: label spans the first three columns, both right-aligned, no grid.
    let span = widths[0] + widths[1] + widths[2];
    let height = leading + 2.0 * CELL_PAD;
    for row in &model.summary {
        canvas.reserve(height);
        let face = if row.bold { Face::Bold } else { Face::Regular };
        let baseline = canvas.y - CELL_PAD - TABLE_SIZE;
        canvas.cell_text(
            face,
            TABLE_SIZE,
            xs[0],
            span,
            baseline,
            &row.label,
            Align::Right,
        );
        canvas.cell_text(
            face,
            TABLE_SIZE,
            xs[3],
            widths[3],
            baseline,
            &row.amount,
            Align::Right,
        );
        canvas.advance(height);
    }
}

/// One gridded row segment. Amount cells are only drawn when `amounts` is set,
/// i.e. on the first segment of a row.
fn item_row(
    canvas: &mut Canvas,
    xs: &[f32; 4],
    widths: &[f32; 4],
    lines: &[String],
    amounts: Option<&ItemRow>,
) {
    let leading = TABLE_SIZE * LEADING;
    let height = lines.len() as f32 * leading + 2.0 * CELL_PAD;
    let bottom = canvas.y - height;
    for i in 0..4 {
        canvas.stroke_rect(xs[i], bottom, widths[i], height);
    }

    let first_baseline = canvas.y - CELL_PAD - TABLE_SIZE;
    for (n, line) in lines.iter().enumerate() {
        let baseline = first_baseline - n as f32 * leading;
        canvas.cell_text(
            Face::Regular,
            TABLE_SIZE,
            xs[0],
            widths[0],
            baseline,
            line,
            Align::Left,
        );
    }
    if let Some(row) = amounts {
        let cells = [
            (&row.qty, Align::Center),
            (&row.unit_price, Align::Right),
            (&row.line_total, Align::Right),
        ];
        for (offset, (text, align)) in cells.into_iter().enumerate() {
            let i = offset + 1;
            canvas.cell_text(
                Face::Regular,
                TABLE_SIZE,
                xs[i],
                widths[i],
                first_baseline,
                text,
                align,
            );
        }
    }
    canvas.advance(height);
}

fn font_dict(face: Face) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn assemble(
    pages: Vec<Vec<Operation>>,
    title: &str,
    setup: &PageSetup,
) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font_dict(Face::Regular));
    let bold_id = doc.add_object(font_dict(Face::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Face::Regular.resource_name() => Object::Reference(regular_id),
            Face::Bold.resource_name() => Object::Reference(bold_id),
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| InvoiceError::Render(format!("failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(setup.width_pt),
                Object::Real(setup.height_pt),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal("tcg-invoice"),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Render(format!("failed to save PDF: {e}")))?;
    Ok(output)
}
