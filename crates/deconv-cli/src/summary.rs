use std::path::Path;

use console::Style;
use deconv_core::deconvolution::{DeconvolutionMethod, MethodKind};
use deconv_core::frame::Frame;
use deconv_core::pipeline::config::PipelineConfig;
use deconv_core::pipeline::{PipelineReport, Route};
use deconv_core::psf::PsfModel;
use deconv_core::quality::{QualityReport, SsimWeighting};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    better: Style,
    worse: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            better: Style::new().green(),
            worse: Style::new().red(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title
            .apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();
    print_title(&s, "Deconvolution Pipeline");

    for input in &config.inputs {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Input"),
            s.path.apply_to(input.display())
        );
    }
    if config.save_images {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(config.output_dir.display())
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.disabled.apply_to("not saved")
        );
    }
    println!();

    // Degradation
    println!("  {}", s.header.apply_to("Degradation"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Blur"),
        s.value.apply_to(&config.degradation.blur)
    );
    let noise = &config.degradation.noise;
    println!(
        "    {:<14}{}",
        s.label.apply_to("Noise"),
        s.value
            .apply_to(format!("mean {}, std dev {}", noise.mean, noise.std_dev))
    );
    if let Some(seed) = noise.seed {
        println!("    {:<14}{}", s.label.apply_to("Seed"), s.value.apply_to(seed));
    }
    println!();

    // Restoration
    println!("  {}", s.header.apply_to("Restoration"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Wiener"),
        s.method
            .apply_to(DeconvolutionMethod::Wiener(config.wiener.clone()))
    );
    match config.wiener.noise_variance {
        Some(v) => println!(
            "    {:<14}{}",
            s.label.apply_to("Noise var"),
            s.value.apply_to(v)
        ),
        None => println!(
            "    {:<14}{}",
            s.label.apply_to("Noise var"),
            s.disabled.apply_to("estimated")
        ),
    }
    println!(
        "    {:<14}{}",
        s.label.apply_to("R-L"),
        s.method.apply_to(DeconvolutionMethod::RichardsonLucy(
            config.richardson_lucy.clone()
        ))
    );
    if let Some(t) = config.richardson_lucy.tolerance {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Tolerance"),
            s.value.apply_to(t)
        );
    }
    println!();

    // Scoring
    println!("  {}", s.header.apply_to("Scoring"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Data range"),
        s.value.apply_to(config.data_range)
    );
    let weighting = match config.ssim.weighting {
        SsimWeighting::Uniform => "uniform".to_string(),
        SsimWeighting::Gaussian { sigma } => format!("gaussian, sigma {sigma}"),
    };
    let n = config.ssim.window_size;
    println!(
        "    {:<14}{}",
        s.label.apply_to("SSIM window"),
        s.value.apply_to(format!("{n}x{n} {weighting}"))
    );
    println!();
}

pub fn print_restore_summary(
    input: &Path,
    frame: &Frame,
    psf: &PsfModel,
    method: &DeconvolutionMethod,
) {
    let s = Styles::new();
    print_title(&s, "Restoration");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value
            .apply_to(format!("{}x{}", frame.width(), frame.height()))
    );
    println!("  {:<14}{}", s.label.apply_to("PSF"), s.value.apply_to(psf));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Method"),
        s.method.apply_to(method)
    );
    println!();
}

pub fn print_comparison(before: &QualityReport, after: &QualityReport) {
    let s = Styles::new();
    println!();
    println!("  {}", s.header.apply_to("Against reference"));
    println!(
        "    {:<10}{:>10}{:>10}",
        s.label.apply_to(""),
        s.label.apply_to("PSNR"),
        s.label.apply_to("SSIM")
    );
    println!(
        "    {:<10}{:>10.2}{:>10.4}",
        "input", before.psnr, before.ssim
    );
    let style = if after.psnr >= before.psnr {
        &s.better
    } else {
        &s.worse
    };
    println!(
        "    {:<10}{}{}",
        "restored",
        style.apply_to(format!("{:>10.2}", after.psnr)),
        style.apply_to(format!("{:>10.4}", after.ssim))
    );
}

pub fn print_report(report: &PipelineReport) {
    let s = Styles::new();

    for run in &report.images {
        print_title(&s, &run.name);
        println!(
            "  {:<16}{:<18}{:>10}{:>10}",
            s.label.apply_to("Route"),
            s.label.apply_to("Method"),
            s.label.apply_to("PSNR"),
            s.label.apply_to("SSIM")
        );
        println!("  {}", "-".repeat(54));

        for route in Route::ALL {
            let Some(baseline) = run.baseline(route) else {
                continue;
            };
            println!(
                "  {:<16}{:<18}{:>10.2}{:>10.4}",
                route.to_string(),
                s.disabled.apply_to("degraded"),
                baseline.psnr,
                baseline.ssim
            );
            for kind in MethodKind::ALL {
                let Some(r) = run.restoration(route, kind) else {
                    continue;
                };
                let style = if r.quality.psnr >= baseline.psnr {
                    &s.better
                } else {
                    &s.worse
                };
                println!(
                    "  {:<16}{:<18}{}{}",
                    "",
                    kind.to_string(),
                    style.apply_to(format!("{:>10.2}", r.quality.psnr)),
                    style.apply_to(format!("{:>10.4}", r.quality.ssim))
                );
            }
        }
    }
}
