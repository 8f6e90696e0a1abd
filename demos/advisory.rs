use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use legible::{blend_colors, Color, ColorContext, LogoColors, Palette,
              DARK_PROBE, LIGHT_PROBE};

type Err = Box<dyn Error>;

fn swatch_row(fh: &mut impl Write, colors: &[Color], width: u32,
              comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px; border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {c}\"></td>")?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

fn scenario(fh: &mut impl Write, name: &str, backdrop: &[&str],
            logo: &str, glow: &str) -> Result<(), Err> {
    let ctx = ColorContext::new(
        Palette::from_hex(backdrop),
        LogoColors::from_hex(logo, glow, &[] as &[&str]),
        Color::from_hex_lossy(glow));
    let text = ctx.text_color().suggested_text_color;
    let advisory = ctx.logo_advisory();

    writeln!(fh, "<h4>{name}</h4>")?;
    swatch_row(fh, ctx.palette().colors(), 60, "backdrop palette")?;

    let first = ctx.palette().dominant().unwrap_or(Color::WHITE);
    writeln!(fh, "<div style=\"width: 320px; padding: 18px; \
                  background-color: {first}\">")?;
    if let Some(gradient) = &advisory.suggested_gradient {
        writeln!(fh, "  <div style=\"padding: 6px; background: {gradient}\">")?;
    } else {
        writeln!(fh, "  <div style=\"padding: 6px\">")?;
    }
    if let Some(effect) = &advisory.suggested_logo_effect {
        writeln!(fh, "    <span style=\"padding: 4px; \
                      background: {}; border: {}; box-shadow: {}; \
                      color: {text}\">{logo} logo</span>",
                 effect.background, effect.border, effect.shadow)?;
    } else {
        writeln!(fh, "    <span style=\"color: {text}\">{logo} logo</span>")?;
    }
    writeln!(fh, "    <p style=\"color: {text}\">Sample overlay text</p>\
                  \n  </div>\n</div>")?;

    let estimates = [blend_colors(DARK_PROBE, first),
                     blend_colors(LIGHT_PROBE, first)];
    swatch_row(fh, &estimates, 60,
               &format!("probe estimates — text resolves to {text}, \
                         enhancement: {}", advisory.needs_enhancement))?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("advisory.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>legible: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Advisories</h3>")?;
    scenario(&mut fh, "Dusk cityscape, dark logo",
             &["#13293d", "#1b3a4b", "#006494"], "#101010", "#ff6b35")?;
    scenario(&mut fh, "Snowfield, white logo",
             &["#fafafa", "#eef2f5", "#dce6ec"], "#ffffff", "#9bd1e5")?;
    scenario(&mut fh, "Forest, brand orange",
             &["#1b4332", "#2d6a4f", "#95d5b2"], "#e8541d", "#ffd166")?;
    scenario(&mut fh, "Single dominant tone",
             &["#202020"], "#1a1a1a", "#ff0000")?;

    writeln!(fh, "<h3>Photocopy check</h3>")?;
    let palette = Palette::from_hex(&["#13293d", "#006494", "#e8f1f2",
                                      "#e8541d", "#ffd166"]);
    let grays: Vec<Color> = palette.colors().iter()
        .map(|c| c.to_gray())
        .collect();
    swatch_row(&mut fh, palette.colors(), 43, "palette")?;
    swatch_row(&mut fh, &grays, 43, "grayscale")?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
