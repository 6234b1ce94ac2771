// main.rs — 程序入口：窗口、事件循环、状态栏与 3D 交互

mod assets;
mod camera;
mod counter;
mod geo;
mod interaction;
mod mesh;
mod picking;
mod renderer;
mod settings;
mod tooltip;

use assets::TextureSlot;
use counter::CounterBank;
use interaction::{Interaction, RotationState};
use renderer::Renderer;
use tooltip::TooltipState;

use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder},
};

use anyhow::{Context, Result};
use glam::Vec2;
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let assets_dir = settings::resolve_assets_dir();
    let config = settings::load(assets_dir.as_deref());

    // 状态栏引用的计数器先验证再开窗
    let counters = CounterBank::builtin(Instant::now());
    counters.expect_targets(&["turnover", "companies"])?;

    let placements = geo::marker_placements(geo::LOCATIONS, geo::GLOBE_RADIUS);
    let stars = mesh::scatter_stars(&mut rand::thread_rng(), mesh::STAR_COUNT);

    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Interactive Globe")
            .with_inner_size(LogicalSize::new(1280, 720))
            .build(&event_loop)
            .context("create window")?,
    );

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        &placements,
        &stars,
        config.vsync,
    ))?;

    // 异步加载通道：纹理在后台线程解码，解码完送回主线程上传
    let (tx, rx) = channel();
    match &assets_dir {
        Some(dir) => {
            log::info!("loading textures from {}", dir.display());
            assets::start_load(TextureSlot::Earth, dir.join(assets::EARTH_TEXTURE), tx.clone());
            assets::start_load(
                TextureSlot::Clouds,
                dir.join(assets::CLOUDS_TEXTURE),
                tx.clone(),
            );

            let icon = dir.join(assets::MARKER_ICON);
            if icon.exists() {
                assets::start_load(TextureSlot::MarkerIcon, icon, tx.clone());
            } else {
                log::info!("no {}, keeping the built-in pin icon", assets::MARKER_ICON);
            }
        }
        None => log::warn!("no assets directory found, rendering with placeholder textures"),
    }
    drop(tx);

    // 交互状态
    let mut interaction = Interaction::new(config.drag_sensitivity, config.spin_speed);
    let mut tooltip_state = TooltipState::default();
    let mut cursor = Vec2::ZERO;
    let mut is_fullscreen = false;

    // FPS 计算
    let mut last_frame_time = Instant::now();
    let mut frame_count = 0;
    let mut fps = 0.0;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        // 检查后台线程是否送来了解码好的纹理
        while let Ok(loaded) = rx.try_recv() {
            renderer.load_texture(loaded.slot, loaded.image);
        }

        match event {
            Event::WindowEvent { event, .. } => {
                // 先让 egui 处理事件
                let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);
                if response.consumed {
                    return;
                }

                // 拖拽、拾取和工具提示都以逻辑像素计
                let scale = window.scale_factor();
                let viewport = {
                    let s = window.inner_size().to_logical::<f32>(scale);
                    Vec2::new(s.width, s.height)
                };

                match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                    }

                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        renderer.resize(*new_inner_size);
                    }

                    WindowEvent::KeyboardInput { input, .. } => {
                        if input.state == ElementState::Pressed
                            && input.virtual_keycode == Some(VirtualKeyCode::F11)
                        {
                            is_fullscreen = !is_fullscreen;
                            if is_fullscreen {
                                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                            } else {
                                window.set_fullscreen(None);
                            }
                        }
                    }

                    // 鼠标交互
                    WindowEvent::MouseInput { state, button, .. } => {
                        if button == MouseButton::Left {
                            match state {
                                ElementState::Pressed => {
                                    let action = interaction.on_pointer_down(
                                        cursor,
                                        viewport,
                                        &placements,
                                        &renderer.camera,
                                    );
                                    tooltip_state.apply(action, cursor);
                                }
                                ElementState::Released => interaction.on_pointer_up(),
                            }
                        }
                    }

                    WindowEvent::CursorMoved { position, .. } => {
                        let logical = position.to_logical::<f32>(scale);
                        cursor = Vec2::new(logical.x, logical.y);

                        let action = interaction.on_pointer_move(
                            cursor,
                            viewport,
                            &placements,
                            &renderer.camera,
                        );
                        tooltip_state.apply(action, cursor);
                    }

                    WindowEvent::CursorLeft { .. } => {
                        interaction.on_pointer_leave();
                    }

                    _ => {}
                }
            }

            Event::RedrawRequested(_) => {
                // FPS 统计
                frame_count += 1;
                let now = Instant::now();
                if now.duration_since(last_frame_time).as_secs_f32() >= 1.0 {
                    fps = frame_count as f32 / now.duration_since(last_frame_time).as_secs_f32();
                    frame_count = 0;
                    last_frame_time = now;
                }

                // 每帧推进自转，再把旋转矩阵写回 GPU
                interaction.advance_frame();
                renderer.update_scene(&interaction.rotation);

                let viewport = {
                    let s = window.inner_size().to_logical::<f32>(window.scale_factor());
                    Vec2::new(s.width, s.height)
                };
                let rotation = interaction.rotation;

                let render_result = renderer.render_with_ui(&window, |ctx| {
                    draw_ui(ctx, &mut tooltip_state, &counters, rotation, fps, viewport);
                });

                match render_result {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => *control_flow = ControlFlow::Exit,
                    Err(e) => log::error!("render error: {e:?}"),
                }
            }

            Event::MainEventsCleared => {
                window.request_redraw();
            }

            _ => {}
        }
    });
}

fn draw_ui(
    ctx: &egui::Context,
    tooltip: &mut TooltipState,
    counters: &CounterBank,
    rotation: RotationState,
    fps: f32,
    viewport: Vec2,
) {
    egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Interactive Globe");
            ui.separator();
            ui.weak("drag to rotate, hover a marker for details");
        });
    });

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let now = Instant::now();

            ui.label(format!(
                "Turnover: {} Crores",
                counters.display("turnover", now).unwrap_or_default()
            ));
            ui.label("|");
            ui.label(format!(
                "Group Companies: {}",
                counters.display("companies", now).unwrap_or_default()
            ));
            ui.label("|");
            ui.label(format!("Yaw: {:.1}°", rotation.globe_yaw.to_degrees()));
            ui.label("|");
            ui.label(egui::RichText::new(format!("FPS: {:.1}", fps)).color(egui::Color32::GREEN));
        });
    });

    // 工具提示：跟随指针，避开窗口边缘
    if let Some(location) = tooltip.marker.and_then(|i| geo::LOCATIONS.get(i)) {
        let pos = tooltip::anchor_tooltip(tooltip.pointer, tooltip.measured, viewport);

        let area = egui::Area::new(egui::Id::new("marker_tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(egui::pos2(pos.x, pos.y))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(&ctx.style()).show(ui, |ui| {
                    ui.set_max_width(tooltip::MAX_WIDTH);
                    ui.strong(location.name);
                    for label in location.labels {
                        ui.label(*label);
                    }
                });
            });

        // 本帧量得的尺寸供下一帧定位使用
        let size = area.response.rect.size();
        tooltip.measured = Vec2::new(size.x, size.y);
    }
}
