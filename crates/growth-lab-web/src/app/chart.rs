//! SVG growth chart: rendering, pointer tracking, KPI tween and idle sweep.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::utils::{document, window};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent, SvgElement, SvgGeometryElement, SvgsvgElement, TouchEvent};

use crate::app::dom::{self, DomResult};
use crate::core::capability::Capabilities;
use crate::core::chart::{ChartData, ChartGeometry, ChartModel, Highlight, SeriesKey, tooltip_anchor};
use crate::core::config::LandingConfig;
use crate::core::motion::{Tween, parse_readout};
use crate::core::scroll::Throttle;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const GRID_STROKE: &str = "rgba(255,255,255,.08)";
const DRAW_EASING: &str = "cubic-bezier(.2,.8,.2,1)";
const LEAVE_GLOW: &str = "0.6";
const IDLE_GLOW: &str = "0.7";
const AREA_OPACITY: &str = "0.95";

/// Every element the chart writes to.
struct ChartView {
    chart: SvgsvgElement,
    grid: Element,
    line: SvgGeometryElement,
    area: SvgElement,
    points: Element,
    tooltip: HtmlElement,
    tt_title: Element,
    tt_text: Element,
    wrap: Element,
    stage: HtmlElement,
    kpi_num: Element,
    kpi_label: Element,
    cross_v: Element,
    glow_dot: SvgElement,
}

impl ChartView {
    fn locate() -> DomResult<Self> {
        Ok(Self {
            chart: dom::by_id("chart")?,
            grid: dom::by_id("grid")?,
            line: dom::by_id("line")?,
            area: dom::by_id("area")?,
            points: dom::by_id("points")?,
            tooltip: dom::by_id("tooltip")?,
            tt_title: dom::by_id("ttTitle")?,
            tt_text: dom::by_id("ttText")?,
            wrap: dom::by_id("chartWrap")?,
            stage: dom::by_id("chartStage")?,
            kpi_num: dom::by_id("kpiNum")?,
            kpi_label: dom::by_id("kpiLabel")?,
            cross_v: dom::by_id("crossV")?,
            glow_dot: dom::by_id("glowDot")?,
        })
    }

    fn view_box(&self, config: &LandingConfig) -> (f64, f64) {
        let rect = self.chart.view_box().base_val();
        let width = rect
            .as_ref()
            .map(|rect| f64::from(rect.width()))
            .filter(|width| *width > 0.0)
            .unwrap_or(config.chart.fallback_width);
        let height = rect
            .as_ref()
            .map(|rect| f64::from(rect.height()))
            .filter(|height| *height > 0.0)
            .unwrap_or(config.chart.fallback_height);
        (width, height)
    }

    fn line_svg(&self) -> &SvgElement {
        self.line.as_ref()
    }

    fn svg_line(x1: f64, x2: f64, y: f64) -> DomResult<Element> {
        let line = document().create_element_ns(Some(SVG_NS), "line")?;
        dom::set_attr(&line, "x1", &x1.to_string());
        dom::set_attr(&line, "x2", &x2.to_string());
        dom::set_attr(&line, "y1", &y.to_string());
        dom::set_attr(&line, "y2", &y.to_string());
        dom::set_attr(&line, "stroke", GRID_STROKE);
        dom::set_attr(&line, "stroke-width", "1");
        Ok(line)
    }
}

struct GrowthChart {
    view: ChartView,
    model: RefCell<ChartModel>,
    caps: Capabilities,
    config: Rc<LandingConfig>,
    kpi_frame: RefCell<Option<AnimationFrame>>,
    area_frame: RefCell<Option<AnimationFrame>>,
    idle_frame: RefCell<Option<AnimationFrame>>,
    touch_gate: RefCell<Throttle>,
}

impl GrowthChart {
    fn simplified(&self) -> bool {
        self.caps.simplified()
    }

    fn render(self: &Rc<Self>) -> DomResult<()> {
        self.render_grid()?;
        let (line, area, markers, last) = {
            let model = self.model.borrow();
            (
                model.line_path(),
                model.area_path(),
                model.markers(),
                model.geometry().last_index(),
            )
        };
        dom::set_attr(&self.view.line, "d", &line);
        dom::set_attr(&self.view.area, "d", &area);

        self.view.points.set_inner_html("");
        let radius = self.caps.on_mobile("4", "4.8");
        for (idx, (cx, cy)) in markers.into_iter().enumerate() {
            let point = document().create_element_ns(Some(SVG_NS), "circle")?;
            dom::add_class(&point, "pt");
            dom::set_attr(&point, "cx", &cx.to_string());
            dom::set_attr(&point, "cy", &cy.to_string());
            dom::set_attr(&point, "r", radius);
            dom::set_attr(&point, "data-idx", &idx.to_string());
            self.view.points.append_child(&point)?;
        }

        let geometry = *self.model.borrow().geometry();
        dom::set_attr(&self.view.cross_v, "y1", &geometry.pad.top.to_string());
        dom::set_attr(&self.view.cross_v, "y2", &geometry.baseline().to_string());

        self.set_index(last, true);
        self.animate_path();
        Ok(())
    }

    fn render_grid(&self) -> DomResult<()> {
        self.view.grid.set_inner_html("");
        if self.simplified() {
            return Ok(());
        }
        let geometry = *self.model.borrow().geometry();
        let lines = self.caps.on_mobile(3, 4);
        let right = geometry.pad.left + geometry.inner_width();
        for y in geometry.grid_rows(lines) {
            let row = ChartView::svg_line(geometry.pad.left, right, y)?;
            self.view.grid.append_child(&row)?;
        }
        Ok(())
    }

    fn animate_path(self: &Rc<Self>) {
        let line = self.view.line_svg();
        if self.simplified() {
            dom::set_style(line, "transition", "none");
            dom::set_style(&self.view.area, "transition", "none");
            return;
        }
        let length = self.view.line.get_total_length();
        if length <= 0.0 {
            return;
        }
        let chart = &self.config.chart;
        let duration = self.caps.on_mobile(chart.draw_mobile_ms, chart.draw_ms);
        let area_delay = self.caps.on_mobile(chart.area_delay_mobile_ms, chart.area_delay_ms);

        dom::set_style(line, "stroke-dasharray", &length.to_string());
        dom::set_style(line, "stroke-dashoffset", &length.to_string());
        // Flush layout so the transition starts from the full offset.
        let _ = self.view.line.get_bounding_client_rect();
        dom::set_style(
            line,
            "transition",
            &format!("stroke-dashoffset {duration}ms {DRAW_EASING}"),
        );
        dom::set_style(line, "stroke-dashoffset", "0");

        dom::set_style(&self.view.area, "opacity", "0");
        dom::set_style(
            &self.view.area,
            "transition",
            &format!(
                "opacity {}ms {DRAW_EASING} {area_delay}ms",
                duration.saturating_sub(200)
            ),
        );
        let chart = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            dom::set_style(&chart.view.area, "opacity", AREA_OPACITY);
        });
        *self.area_frame.borrow_mut() = Some(handle);
    }

    fn set_index(self: &Rc<Self>, index: usize, silent: bool) {
        let highlight = self.model.borrow().highlight(index);
        let cx = highlight.cx.to_string();
        dom::set_attr(&self.view.cross_v, "x1", &cx);
        dom::set_attr(&self.view.cross_v, "x2", &cx);
        dom::set_attr(&self.view.glow_dot, "cx", &cx);
        dom::set_attr(&self.view.glow_dot, "cy", &highlight.cy.to_string());
        if !self.simplified() {
            dom::set_style(&self.view.glow_dot, "opacity", "1");
        }
        if !silent {
            self.set_kpi(&highlight);
        }
    }

    fn set_kpi(self: &Rc<Self>, highlight: &Highlight) {
        self.view
            .kpi_label
            .set_text_content(Some(&highlight.kpi_label));
        let target = i64::from(highlight.value);
        if self.simplified() {
            let text = self.model.borrow().readout(target);
            self.view.kpi_num.set_text_content(Some(&text));
            return;
        }
        let shown = parse_readout(&self.view.kpi_num.text_content().unwrap_or_default());
        let chart = &self.config.chart;
        let duration = self.caps.on_mobile(chart.kpi_mobile_ms, chart.kpi_ms);
        let tween = Tween::new(shown, target, dom::now_ms(), duration);
        self.schedule_kpi(tween);
    }

    fn schedule_kpi(self: &Rc<Self>, tween: Tween) {
        let chart = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            let now = dom::now_ms();
            let text = chart.model.borrow().readout(tween.value_at(now));
            chart.view.kpi_num.set_text_content(Some(&text));
            if !tween.finished(now) {
                chart.schedule_kpi(tween);
            }
        });
        *self.kpi_frame.borrow_mut() = Some(handle);
    }

    fn show_tooltip(&self, highlight: &Highlight, client: (f64, f64)) {
        if self.simplified() || self.caps.mobile {
            return;
        }
        self.view
            .tt_title
            .set_text_content(Some(&highlight.tooltip_title));
        self.view
            .tt_text
            .set_text_content(Some(&highlight.tooltip_text));
        let rect = self.view.stage.get_bounding_client_rect();
        let (x, y) = tooltip_anchor(client, (rect.left(), rect.top()), rect.width());
        dom::set_style(&self.view.tooltip, "left", &format!("{x}px"));
        dom::set_style(&self.view.tooltip, "top", &format!("{y}px"));
        dom::add_class(&self.view.tooltip, "show");
    }

    fn hide_tooltip(&self) {
        dom::remove_class(&self.view.tooltip, "show");
    }

    fn pointer_move(self: &Rc<Self>, client: (f64, f64)) {
        if self.simplified() && self.caps.mobile {
            return;
        }
        let rect = self.view.stage.get_bounding_client_rect();
        let index = self
            .model
            .borrow_mut()
            .pointer_move(client.0, rect.left(), rect.width());
        if self.caps.mobile && !self.touch_gate.borrow_mut().ready(dom::now_ms()) {
            return;
        }
        self.set_index(index, false);
        let highlight = self.model.borrow().highlight(index);
        self.show_tooltip(&highlight, client);
    }

    fn pointer_enter(self: &Rc<Self>, client: (f64, f64)) {
        if self.simplified() {
            return;
        }
        if !self.caps.reduced_motion {
            dom::set_style(&self.view.glow_dot, "opacity", "1");
        }
        self.pointer_move(client);
    }

    fn pointer_leave(self: &Rc<Self>) {
        let index = self.model.borrow_mut().pointer_leave();
        self.hide_tooltip();
        self.set_index(index, true);
        let highlight = self.model.borrow().highlight(index);
        self.set_kpi(&highlight);
        if !self.simplified() {
            dom::set_style(&self.view.glow_dot, "opacity", LEAVE_GLOW);
        }
    }

    fn select(self: &Rc<Self>, tag: &Element) {
        let Some(key) = tag
            .get_attribute("data-series")
            .as_deref()
            .and_then(SeriesKey::parse)
        else {
            return;
        };
        if !self.model.borrow_mut().select(key) {
            return;
        }
        for other in dom::query_all_in(&self.view.wrap, ".legend .tag") {
            dom::toggle_class(&other, "active", &other == tag);
        }
        tracing::debug!(series = key.as_str(), "chart series selected");
        if let Err(err) = self.render() {
            tracing::debug!(error = %err, "chart render failed");
        }
    }

    fn start_idle(self: &Rc<Self>) {
        if self.simplified() || self.caps.mobile {
            return;
        }
        let chart = Rc::clone(self);
        let handle = request_animation_frame(move |t| chart.idle_tick(t));
        *self.idle_frame.borrow_mut() = Some(handle);
    }

    fn idle_tick(self: &Rc<Self>, t: f64) {
        let engaged = self.model.borrow().engaged();
        if !engaged {
            let period = self.config.chart.idle_period_ms;
            let step = self.model.borrow_mut().idle_step(t, period);
            if let Some(index) = step {
                self.set_index(index, true);
            }
            dom::set_style(&self.view.glow_dot, "opacity", IDLE_GLOW);
        }
        self.start_idle();
    }

    fn stop(&self) {
        self.idle_frame.borrow_mut().take();
        self.kpi_frame.borrow_mut().take();
        self.hide_tooltip();
    }

    fn resize(self: &Rc<Self>) {
        self.hide_tooltip();
        if self.simplified() {
            return;
        }
        if let Err(err) = self.render() {
            tracing::debug!(error = %err, "chart render failed");
        }
    }
}

fn mouse_point(event: &Event) -> Option<(f64, f64)> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some((f64::from(mouse.client_x()), f64::from(mouse.client_y())))
}

/// Client position of the only touch, `None` for multi-touch gestures.
fn single_touch(event: &Event) -> Option<(f64, f64)> {
    let touches = event.dyn_ref::<TouchEvent>()?.touches();
    if touches.length() != 1 {
        return None;
    }
    let touch = touches.get(0)?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}

fn bind_pointer(chart: &Rc<GrowthChart>, caps: &Capabilities, config: &LandingConfig) {
    let stage = chart.view.stage.clone();
    if caps.mobile {
        {
            let chart = Rc::clone(chart);
            dom::listen(&stage, "touchstart", move |event| {
                if let Some(point) = single_touch(event) {
                    chart.pointer_move(point);
                }
            });
        }
        {
            let chart = Rc::clone(chart);
            let mut throttle = Throttle::new(config.chart.touch_throttle_ms);
            dom::listen_active(&stage, "touchmove", move |event| {
                if !throttle.ready(dom::now_ms()) {
                    return;
                }
                if let Some(point) = single_touch(event) {
                    event.prevent_default();
                    chart.pointer_move(point);
                }
            });
        }
        let chart = Rc::clone(chart);
        dom::listen(&stage, "touchend", move |_| chart.pointer_leave());
        return;
    }

    {
        let chart = Rc::clone(chart);
        let window_ms = caps.tiered(
            config.chart.pointer_throttle_low_perf_ms,
            config.chart.pointer_throttle_ms,
        );
        let mut throttle = Throttle::new(window_ms);
        dom::listen(&stage, "pointermove", move |event| {
            if !throttle.ready(dom::now_ms()) {
                return;
            }
            if let Some(point) = mouse_point(event) {
                chart.pointer_move(point);
            }
        });
    }
    {
        let chart = Rc::clone(chart);
        dom::listen(&stage, "pointerenter", move |event| {
            if let Some(point) = mouse_point(event) {
                chart.pointer_enter(point);
            }
        });
    }
    let chart = Rc::clone(chart);
    dom::listen(&stage, "pointerleave", move |_| chart.pointer_leave());
}

/// Locate the chart elements, draw the default series and bind interaction.
pub(crate) fn init(caps: &Capabilities, config: &Rc<LandingConfig>) -> DomResult<()> {
    let view = ChartView::locate()?;
    if caps.mobile {
        let chart: &SvgElement = view.chart.as_ref();
        dom::set_style(chart, "touch-action", "pan-y");
        dom::set_style(&view.stage, "cursor", "default");
    }
    let (width, height) = view.view_box(config);
    let data = ChartData::default();
    let geometry = ChartGeometry::new(width, height, config.chart.padding, data.len());
    let default_key = data.default_key();
    let chart = Rc::new(GrowthChart {
        view,
        model: RefCell::new(ChartModel::new(data, geometry)),
        caps: *caps,
        config: Rc::clone(config),
        kpi_frame: RefCell::new(None),
        area_frame: RefCell::new(None),
        idle_frame: RefCell::new(None),
        touch_gate: RefCell::new(Throttle::new(config.chart.mobile_move_gate_ms)),
    });

    bind_pointer(&chart, caps, config);

    let tags = dom::query_all_in(&chart.view.wrap, ".legend .tag");
    for tag in tags {
        if tag.get_attribute("data-series").as_deref() == Some(default_key.as_str()) {
            dom::add_class(&tag, "active");
        }
        let chart = Rc::clone(&chart);
        let target = tag.clone();
        dom::listen(&target, "click", move |_| chart.select(&tag));
    }

    chart.render()?;
    chart.start_idle();

    {
        let chart = Rc::clone(&chart);
        dom::listen(&window(), "resize", move |_| chart.resize());
    }
    dom::listen(&window(), "pagehide", move |_| chart.stop());
    Ok(())
}
