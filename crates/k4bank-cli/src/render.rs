//! Plain-text views of a decoded bank.

use std::fmt::{self, Display, Write};
use std::path::Path;

use k4bank_core::{
    Bank, BankLayout, MultiPatch, MultiSection, SinglePatch, SysExEnvelope, patch_label,
};

const GRID_COLUMNS: usize = 4;
const SOURCE_WIDTH: usize = 10;
const SECTION_WIDTH: usize = 5;

/// Names of every single and multi, the drum map and the effect list.
pub fn listing(bank: &Bank) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "SINGLE")?;
    let singles: Vec<&str> = bank.singles.iter().map(|p| p.name.as_str()).collect();
    grid(&mut out, 'S', &singles)?;

    writeln!(out)?;
    writeln!(out, "MULTI")?;
    let multis: Vec<&str> = bank.multis.iter().map(|p| p.name.as_str()).collect();
    grid(&mut out, 'M', &multis)?;

    let drum = &bank.drum;
    writeln!(out)?;
    writeln!(out, "DRUM")?;
    writeln!(
        out,
        "channel {}  volume {}  velocity depth {}",
        u16::from(drum.receive_channel) + 1,
        drum.volume,
        drum.velocity_depth
    )?;
    writeln!(out, "KEY SUB  WAVE1 DCY1 TUN1 LVL1  WAVE2 DCY2 TUN2 LVL2")?;
    for note in &drum.notes {
        write!(out, "{:>3}  {}", note.key, submix_letter(note.submix))?;
        for source in &note.sources {
            write!(
                out,
                "  {:>5} {:>4} {:>4} {:>4}",
                source.wave + 1,
                source.decay,
                source.tune,
                source.level
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "EFFECT")?;
    for (i, effect) in bank.effects.iter().enumerate() {
        writeln!(
            out,
            "E-{:<3} {:<32} {:>2} {:>2} {:>2}",
            i + 1,
            effect.effect_type.to_string(),
            effect.param1,
            effect.param2,
            effect.param3
        )?;
    }
    Ok(out)
}

/// Bank-major grid: row `r` lists A-r, B-r, C-r and D-r side by side.
fn grid(out: &mut String, prefix: char, names: &[&str]) -> fmt::Result {
    let rows = names.len().div_ceil(GRID_COLUMNS);
    for row in 0..rows {
        let cells: Vec<String> = (0..GRID_COLUMNS)
            .map(|column| row + column * rows)
            .filter_map(|index| {
                names
                    .get(index)
                    .map(|name| format!("{}{:<4} {}", prefix, patch_label(index), name))
            })
            .collect();
        writeln!(out, "{}", cells.join("   ").trim_end())?;
    }
    Ok(())
}

/// Header fields of a dump and the fixed section offsets of a bank.
pub fn identification(
    path: &Path,
    len: usize,
    envelope: &SysExEnvelope,
    layout: &BankLayout,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "file:         {}", path.display())?;
    writeln!(out, "bytes:        {}", len)?;
    writeln!(out, "manufacturer: {:#04x} (Kawai)", envelope.manufacturer_id)?;
    writeln!(out, "channel:      {}", envelope.channel)?;
    match envelope.function_kind() {
        Some(function) => writeln!(out, "function:     {:#04x} ({:?})", envelope.function, function)?,
        None => writeln!(out, "function:     {:#04x} (unknown)", envelope.function)?,
    }
    writeln!(out, "group:        {:#04x}", envelope.group)?;
    writeln!(out, "machine:      {:#04x}", envelope.machine)?;
    writeln!(out, "sub status 1: {:#04x}", envelope.sub_status1)?;
    writeln!(out, "sub status 2: {:#04x}", envelope.sub_status2)?;
    match envelope.identify() {
        Some(identity) => {
            write!(
                out,
                "dump:         {:?} {:?} {:?}",
                identity.locality, identity.cardinality, identity.kind
            )?;
            if let Some(number) = identity.patch_number {
                write!(out, " #{}", number)?;
            }
            writeln!(out)?;
        }
        None => writeln!(out, "dump:         unrecognized")?,
    }
    writeln!(out, "offsets:")?;
    writeln!(out, "  single  {:#06x}", layout.single.offset)?;
    writeln!(out, "  multi   {:#06x}", layout.multi.offset)?;
    writeln!(out, "  drum    {:#06x}", layout.drum.offset)?;
    writeln!(out, "  effect  {:#06x}", layout.effect.offset)?;
    writeln!(out, "  eox     {:#06x}", layout.eox_offset)?;
    Ok(out)
}

/// Parameter sheet rows: `category  label  value value ...`, with the
/// category shown only on the first row of its group.
struct Sheet {
    out: String,
    category: &'static str,
}

impl Sheet {
    fn new() -> Self {
        Self {
            out: String::new(),
            category: "",
        }
    }

    fn field(&mut self, label: &str, value: impl Display) -> fmt::Result {
        writeln!(self.out, "{:<10}{}", label, value)
    }

    fn header<T: Display>(&mut self, titles: &[T], width: usize) -> fmt::Result {
        self.category = "";
        write!(self.out, "{:30}", "")?;
        self.cells(titles, width)
    }

    fn row<T: Display>(
        &mut self,
        category: &'static str,
        label: &str,
        values: &[T],
        width: usize,
    ) -> fmt::Result {
        let shown = if self.category == category { "" } else { category };
        self.category = category;
        write!(self.out, "{:<10}{:<20}", shown, label)?;
        self.cells(values, width)
    }

    fn value(&mut self, category: &'static str, label: &str, value: impl Display) -> fmt::Result {
        self.row(category, label, &[value], 0)
    }

    fn cells<T: Display>(&mut self, values: &[T], width: usize) -> fmt::Result {
        let mut line = String::new();
        for value in values {
            // Enum labels ignore padding unless rendered first.
            write!(line, "{:^width$}", value.to_string())?;
        }
        writeln!(self.out, "{}", line.trim_end())
    }
}

/// Every common, DCO, DCA and DCF parameter of one single.
pub fn single_sheet(label: &str, patch: &SinglePatch) -> Result<String, fmt::Error> {
    let mut sheet = Sheet::new();
    sheet.field("Patch", label)?;
    sheet.field("Name", &patch.name)?;
    sheet.field("Volume", patch.volume)?;
    sheet.field("Effect", u16::from(patch.effect) + 1)?;
    sheet.field("Submix ch", submix_letter(patch.submix))?;

    let am = match (patch.am_s1_to_s2, patch.am_s3_to_s4) {
        (true, true) => "1>2 3>4",
        (true, false) => "1>2",
        (false, true) => "3>4",
        (false, false) => "OFF",
    };
    sheet.value("Common", "Source Mode", patch.source_mode)?;
    sheet.value("Common", "AM", am)?;
    sheet.value("Common", "Poly Mode", patch.polyphony_mode)?;
    sheet.value("Common", "Bender Range", patch.pitch_bend_range)?;
    sheet.value("Common", "Press Freq", patch.pressure_freq)?;
    sheet.value("Common", "Wheel Assign", patch.wheel_assign)?;
    sheet.value("Common", "      Depth", patch.wheel_depth)?;
    sheet.value("Common", "Auto Bend Time", patch.auto_bend.time)?;
    sheet.value("Common", "          Depth", patch.auto_bend.depth)?;
    sheet.value("Common", "          KS Time", patch.auto_bend.key_scaling_time)?;
    sheet.value("Common", "          Vel Depth", patch.auto_bend.velocity_depth)?;

    sheet.value("LFO", "Vibrato Shape", patch.vibrato.shape)?;
    sheet.value("LFO", "        Speed", patch.vibrato.speed)?;
    sheet.value("LFO", "        Depth", patch.vibrato.depth)?;
    sheet.value("LFO", "        Press Depth", patch.vibrato.pressure)?;
    sheet.value("LFO", "DCF-LFO Shape", patch.lfo.shape)?;
    sheet.value("LFO", "        Speed", patch.lfo.speed)?;
    sheet.value("LFO", "        Delay", patch.lfo.delay)?;
    sheet.value("LFO", "        Depth", patch.lfo.depth)?;
    sheet.value("LFO", "        Press Depth", patch.lfo.pressure_depth)?;

    let sources = patch.sources;
    let w = SOURCE_WIDTH;
    sheet.header(&["S1", "S2", "S3", "S4"], w)?;
    sheet.row("S-Common", "Mute", &patch.source_mutes.map(on_off), w)?;
    sheet.row("S-Common", "Delay", &sources.map(|s| s.delay), w)?;
    sheet.row("S-Common", "Vel curve", &sources.map(|s| s.velocity_curve + 1), w)?;
    sheet.row("S-Common", "KS curve", &sources.map(|s| s.key_scaling_curve + 1), w)?;
    sheet.row("DCO", "Wave", &sources.map(|s| s.wave_number()), w)?;
    sheet.row("DCO", "Key Track", &sources.map(|s| on_off(s.key_track)), w)?;
    sheet.row("DCO", "Coarse", &sources.map(|s| s.coarse), w)?;
    sheet.row("DCO", "Fine", &sources.map(|s| s.fine), w)?;
    sheet.row("DCO", "Fixed Key", &sources.map(|s| s.fixed_key), w)?;
    sheet.row("DCO", "Press freq", &sources.map(|s| on_off(s.pressure_frequency)), w)?;
    sheet.row("DCO", "Vib/A.bend", &sources.map(|s| on_off(s.vibrato)), w)?;

    let amps = patch.amplifiers;
    sheet.row("DCA", "Level", &amps.map(|a| a.envelope_level), w)?;
    sheet.row("DCA", "Attack", &amps.map(|a| a.envelope.attack), w)?;
    sheet.row("DCA", "Decay", &amps.map(|a| a.envelope.decay), w)?;
    sheet.row("DCA", "Sustain", &amps.map(|a| a.envelope.sustain), w)?;
    sheet.row("DCA", "Release", &amps.map(|a| a.envelope.release), w)?;
    sheet.row("DCA Mod", "Vel Depth", &amps.map(|a| a.level_mod.velocity_depth), w)?;
    sheet.row("DCA Mod", "Press Depth", &amps.map(|a| a.level_mod.pressure_depth), w)?;
    sheet.row("DCA Mod", "KS Depth", &amps.map(|a| a.level_mod.key_scaling_depth), w)?;
    sheet.row("DCA Mod", "Time Mod Attack", &amps.map(|a| a.time_mod.attack_velocity), w)?;
    sheet.row("DCA Mod", "         Release", &amps.map(|a| a.time_mod.release_velocity), w)?;
    sheet.row("DCA Mod", "         KS", &amps.map(|a| a.time_mod.key_scaling), w)?;

    let filters = patch.filters;
    let w = SOURCE_WIDTH * 2;
    sheet.header(&["S1/S2", "S3/S4"], w)?;
    sheet.row("DCF", "Cutoff", &filters.map(|f| f.cutoff), w)?;
    sheet.row("DCF", "Resonance", &filters.map(|f| f.resonance + 1), w)?;
    sheet.row("DCF", "Vel Depth", &filters.map(|f| f.cutoff_mod.velocity_depth), w)?;
    sheet.row("DCF", "Press Depth", &filters.map(|f| f.cutoff_mod.pressure_depth), w)?;
    sheet.row("DCF", "KS Depth", &filters.map(|f| f.cutoff_mod.key_scaling_depth), w)?;
    sheet.row("DCF", "LFO", &filters.map(|f| on_off(f.lfo)), w)?;
    sheet.row("DCF Mod", "Env Depth", &filters.map(|f| f.envelope_depth), w)?;
    sheet.row("DCF Mod", "Vel Depth", &filters.map(|f| f.envelope_velocity_depth), w)?;
    sheet.row("DCF Mod", "Attack", &filters.map(|f| f.envelope.attack), w)?;
    sheet.row("DCF Mod", "Decay", &filters.map(|f| f.envelope.decay), w)?;
    sheet.row("DCF Mod", "Sustain", &filters.map(|f| f.envelope.sustain), w)?;
    sheet.row("DCF Mod", "Release", &filters.map(|f| f.envelope.release), w)?;
    sheet.row("DCF Mod", "Time Mod Attack", &filters.map(|f| f.time_mod.attack_velocity), w)?;
    sheet.row("DCF Mod", "         Release", &filters.map(|f| f.time_mod.release_velocity), w)?;
    sheet.row("DCF Mod", "         KS", &filters.map(|f| f.time_mod.key_scaling), w)?;

    Ok(sheet.out)
}

/// Section settings of one multi, followed by the names of the singles it
/// plays.
pub fn multi_sheet(
    label: &str,
    patch: &MultiPatch,
    singles: &[SinglePatch],
) -> Result<String, fmt::Error> {
    let mut sheet = Sheet::new();
    sheet.field("Patch", label)?;
    sheet.field("Name", &patch.name)?;
    sheet.field("Volume", patch.volume)?;
    sheet.field("Effect", u16::from(patch.effect) + 1)?;

    let sections = &patch.sections;
    let w = SECTION_WIDTH;
    let titles: Vec<String> = (1..=sections.len()).map(|n| n.to_string()).collect();
    sheet.header(&titles, w)?;
    let singles_used = per_section(sections, |s| patch_label(usize::from(s.single_number)));
    sheet.row("Inst", "Single Number", &singles_used, w)?;
    sheet.row("Zone", "Zone Lo", &per_section(sections, |s| s.zone.low.to_string()), w)?;
    sheet.row("Zone", "Zone Hi", &per_section(sections, |s| s.zone.high.to_string()), w)?;
    sheet.row("Zone", "Vel Sw", &per_section(sections, |s| s.velocity_switch.to_string()), w)?;
    let channels = per_section(sections, |s| (s.receive_channel + 1).to_string());
    sheet.row("Sec Ch", "Rcv Ch", &channels, w)?;
    sheet.row("Sec Ch", "Mode", &per_section(sections, |s| s.play_mode.to_string()), w)?;
    sheet.row("Sec Ch", "Mute", &per_section(sections, |s| on_off(s.muted).to_string()), w)?;
    sheet.row("Output", "Level", &per_section(sections, |s| s.level.to_string()), w)?;
    sheet.row("Output", "Trans", &per_section(sections, |s| s.transpose.to_string()), w)?;
    sheet.row("Output", "Tune", &per_section(sections, |s| s.tune.to_string()), w)?;
    let submixes = per_section(sections, |s| submix_letter(s.submix).to_string());
    sheet.row("Output", "Submix Ch", &submixes, w)?;

    let mut used: Vec<usize> = Vec::new();
    for section in sections {
        let index = usize::from(section.single_number);
        if !used.contains(&index) {
            used.push(index);
        }
    }
    let names: Vec<String> = used
        .into_iter()
        .map(|index| match singles.get(index) {
            Some(single) => format!("{} = {}", patch_label(index), single.name),
            None => format!("{} = ?", patch_label(index)),
        })
        .collect();
    writeln!(sheet.out, "{}", names.join("  "))?;

    Ok(sheet.out)
}

fn per_section(sections: &[MultiSection], f: impl Fn(&MultiSection) -> String) -> Vec<String> {
    sections.iter().map(f).collect()
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

fn submix_letter(submix: u8) -> char {
    char::from(b'A' + (submix & 0x07))
}
