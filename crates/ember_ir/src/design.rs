//! The mutable design context that synthesis builds into.
//!
//! A [`Design`] owns scopes, nets, devices and the pin [`Connectivity`], plus
//! the [`DiagnosticSink`] whose error count tells the caller whether
//! synthesis succeeded. Names are interned in a caller-owned [`Interner`].

use crate::arena::Arena;
use crate::device::{Device, DeviceClass, DeviceKind, GateKind, Terminal};
use crate::expr::Expr;
use crate::ids::{DeviceId, NetId, PinId, ScopeId};
use crate::net::{Net, NetKind};
use crate::nexus::{Connectivity, PinOwner};
use crate::printer::ExprDisplay;
use crate::scope::Scope;
use ember_common::{EmberResult, Ident, InternalError, Interner, Logic, LogicVec};
use ember_config::SynthConfig;
use ember_diagnostics::{Diagnostic, DiagnosticSink};
use ember_source::Span;
use tracing::trace;

/// Netlist under construction.
pub struct Design<'a> {
    interner: &'a Interner,
    config: SynthConfig,
    scopes: Arena<ScopeId, Scope>,
    nets: Arena<NetId, Net>,
    devices: Arena<DeviceId, Device>,
    connectivity: Connectivity,
    sink: DiagnosticSink,
    root: ScopeId,
}

impl<'a> Design<'a> {
    /// Creates a design with default settings and a root scope named `root_name`.
    pub fn new(interner: &'a Interner, root_name: &str) -> Self {
        Self::with_config(interner, root_name, SynthConfig::default())
    }

    /// Creates a design with explicit synthesis settings.
    pub fn with_config(interner: &'a Interner, root_name: &str, config: SynthConfig) -> Self {
        let mut scopes = Arena::new();
        let root = scopes.alloc(Scope::new(interner.get_or_intern(root_name), None));
        Self {
            interner,
            config,
            scopes,
            nets: Arena::new(),
            devices: Arena::new(),
            connectivity: Connectivity::new(),
            sink: DiagnosticSink::new(),
            root,
        }
    }

    /// The interner used for all names.
    pub fn interner(&self) -> &'a Interner {
        self.interner
    }

    /// Synthesis settings.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// The root scope.
    pub fn root_scope(&self) -> ScopeId {
        self.root
    }

    /// Adds a child scope `<parent>.<leaf>`.
    pub fn add_scope(&mut self, parent: ScopeId, leaf: &str) -> ScopeId {
        let name = self.interner.qualify(self.scopes[parent].name, leaf);
        self.scopes.alloc(Scope::new(name, Some(parent)))
    }

    /// Scope by ID.
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    /// Fresh wire name `<scope>.<wire_prefix><n>`.
    pub fn local_symbol(&mut self, scope: ScopeId) -> Ident {
        let n = self.scopes[scope].bump_wire();
        let leaf = format!("{}{n}", self.config.wire_prefix);
        self.interner.qualify(self.scopes[scope].name, &leaf)
    }

    /// Fresh device name `<scope>.<device_prefix><n>`.
    pub fn local_device_symbol(&mut self, scope: ScopeId) -> Ident {
        let n = self.scopes[scope].bump_device();
        let leaf = format!("{}{n}", self.config.device_prefix);
        self.interner.qualify(self.scopes[scope].name, &leaf)
    }

    // ---- nets ----

    /// Declares a net. `name` is the leaf name within `scope`.
    pub fn add_net(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: NetKind,
        width: u32,
        span: Span,
    ) -> NetId {
        let name = self.interner.qualify(self.scopes[scope].name, name);
        self.alloc_net(scope, name, kind, false, width, span)
    }

    /// Creates a fresh local [`NetKind::Implicit`] bus.
    pub fn new_temp_net(&mut self, scope: ScopeId, width: u32, span: Span) -> NetId {
        let name = self.local_symbol(scope);
        self.alloc_net(scope, name, NetKind::Implicit, true, width, span)
    }

    /// Creates a fresh local [`NetKind::Wire`] bus, as used for part-selects.
    pub fn new_local_wire(&mut self, scope: ScopeId, width: u32, span: Span) -> NetId {
        let name = self.local_symbol(scope);
        self.alloc_net(scope, name, NetKind::Wire, true, width, span)
    }

    /// Creates a fresh [`NetKind::Wire`] bus that is never reclaimed.
    pub fn new_wire(&mut self, scope: ScopeId, width: u32, span: Span) -> NetId {
        let name = self.local_symbol(scope);
        self.alloc_net(scope, name, NetKind::Wire, false, width, span)
    }

    fn alloc_net(
        &mut self,
        scope: ScopeId,
        name: Ident,
        kind: NetKind,
        local: bool,
        width: u32,
        span: Span,
    ) -> NetId {
        let id = self.nets.next_id();
        let pins = (0..width)
            .map(|bit| {
                self.connectivity
                    .add_pin(PinOwner::Net { net: id, bit }, kind.pin_drive())
            })
            .collect();
        self.nets.alloc(Net {
            id,
            name,
            scope,
            kind,
            local,
            pins,
            span,
            refs: 0,
        })
    }

    /// Net by ID.
    ///
    /// # Panics
    ///
    /// Panics if the net was reclaimed.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id]
    }

    /// Net by ID, or `None` once reclaimed.
    pub fn try_net(&self, id: NetId) -> Option<&Net> {
        self.nets.try_get(id)
    }

    /// Live nets in creation order.
    pub fn nets(&self) -> impl Iterator<Item = &Net> {
        self.nets.values()
    }

    /// Looks a net up by its full dotted name.
    pub fn find_net(&self, name: &str) -> Option<NetId> {
        let ident = self.interner.get(name)?;
        self.nets.values().find(|n| n.name == ident).map(|n| n.id)
    }

    /// Records a reference to `net` held by an expression or port.
    pub fn add_reference(&mut self, net: NetId) -> EmberResult<()> {
        let n = self.live_net_mut(net)?;
        n.refs += 1;
        Ok(())
    }

    /// Drops a reference taken with [`add_reference`](Self::add_reference).
    pub fn release_reference(&mut self, net: NetId) -> EmberResult<()> {
        let n = self.live_net_mut(net)?;
        n.refs = n
            .refs
            .checked_sub(1)
            .ok_or_else(|| InternalError::new(format!("net {} has no references", net.as_raw())))?;
        Ok(())
    }

    /// Deletes a local, unreferenced net. Connections made through its pins
    /// remain in place.
    pub fn reclaim_net(&mut self, net: NetId) -> EmberResult<()> {
        let n = self.live_net(net)?;
        if !n.is_reclaimable() {
            return Err(InternalError::new(format!(
                "net `{}` is not a reclaimable temporary",
                self.interner.resolve(n.name)
            )));
        }
        trace!(net = self.interner.resolve(n.name), "reclaiming temporary");
        self.nets.remove(net);
        Ok(())
    }

    fn live_net(&self, net: NetId) -> EmberResult<&Net> {
        self.nets
            .try_get(net)
            .ok_or_else(|| InternalError::new(format!("net {} was reclaimed", net.as_raw())))
    }

    fn live_net_mut(&mut self, net: NetId) -> EmberResult<&mut Net> {
        self.nets
            .try_get_mut(net)
            .ok_or_else(|| InternalError::new(format!("net {} was reclaimed", net.as_raw())))
    }

    /// Pin of bit `bit` of `net`.
    pub fn net_pin(&self, net: NetId, bit: u32) -> EmberResult<PinId> {
        let n = self.live_net(net)?;
        n.pin(bit).ok_or_else(|| {
            InternalError::new(format!(
                "bit {bit} out of range for `{}` of width {}",
                self.interner.resolve(n.name),
                n.width()
            ))
        })
    }

    // ---- devices ----

    /// Instantiates a device with a fresh name in `scope`.
    pub fn add_device(&mut self, scope: ScopeId, kind: DeviceKind, span: Span) -> DeviceId {
        let name = self.local_device_symbol(scope);
        let id = self.devices.next_id();
        let pins = (0..kind.pin_count())
            .map(|index| {
                let owner = PinOwner::Device { device: id, index };
                self.connectivity.add_pin(owner, kind.pin_drive(index))
            })
            .collect();
        trace!(device = self.interner.resolve(name), %kind, "device");
        self.devices.alloc(Device {
            id,
            name,
            scope,
            kind,
            pins,
            attributes: Vec::new(),
            span,
        })
    }

    /// Device by ID.
    pub fn device(&self, id: DeviceId) -> &Device {
        &self.devices[id]
    }

    /// Sets an attribute on a device.
    pub fn set_attribute(&mut self, id: DeviceId, key: &str, value: &str) {
        let key = self.interner.get_or_intern(key);
        self.devices[id].set_attribute(key, value);
    }

    /// Value of a device attribute.
    pub fn attribute(&self, id: DeviceId, key: &str) -> Option<&str> {
        let key = self.interner.get(key)?;
        self.devices[id].attribute(key)
    }

    /// All devices in creation order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Number of devices of a class.
    pub fn count_devices(&self, class: DeviceClass) -> usize {
        self.devices().filter(|d| d.kind.class() == class).count()
    }

    /// Number of logic gates of a kind.
    pub fn count_gates(&self, gate: GateKind) -> usize {
        self.devices()
            .filter(|d| matches!(d.kind, DeviceKind::Logic { gate: g, .. } if g == gate))
            .count()
    }

    /// Pin of a device terminal.
    pub fn device_pin(&self, device: DeviceId, terminal: Terminal) -> EmberResult<PinId> {
        let d = &self.devices[device];
        d.terminal(terminal).ok_or_else(|| {
            InternalError::new(format!(
                "device `{}` ({}) has no terminal {terminal}",
                self.interner.resolve(d.name),
                d.kind
            ))
        })
    }

    // ---- connectivity ----

    /// Joins the connection points of two pins.
    pub fn connect(&mut self, a: PinId, b: PinId) {
        self.connectivity.connect(a, b);
    }

    /// Connects bit `bit` of `net` to a device terminal.
    pub fn wire(
        &mut self,
        net: NetId,
        bit: u32,
        device: DeviceId,
        terminal: Terminal,
    ) -> EmberResult<()> {
        let a = self.net_pin(net, bit)?;
        let b = self.device_pin(device, terminal)?;
        self.connect(a, b);
        Ok(())
    }

    /// Connects two nets pin-for-pin. Widths must match.
    pub fn connect_nets(&mut self, a: NetId, b: NetId) -> EmberResult<()> {
        let (wa, wb) = (self.live_net(a)?.width(), self.live_net(b)?.width());
        if wa != wb {
            return Err(InternalError::new(format!(
                "cannot connect nets of width {wa} and {wb}"
            )));
        }
        for bit in 0..wa {
            let pa = self.net_pin(a, bit)?;
            let pb = self.net_pin(b, bit)?;
            self.connect(pa, pb);
        }
        Ok(())
    }

    /// Returns `true` if the connection point of `pin` has drivers and all
    /// of them are agreeing constants.
    pub fn drivers_constant(&self, pin: PinId) -> bool {
        self.connectivity.drivers_constant(pin)
    }

    /// Constant value on the connection point of `pin`.
    pub fn driven_value(&self, pin: PinId) -> Option<Logic> {
        self.connectivity.driven_value(pin)
    }

    /// Value of `net` if every bit is constant-driven.
    pub fn constant_value(&self, net: NetId) -> Option<LogicVec> {
        let n = self.try_net(net)?;
        let mut value = LogicVec::all_zero(n.width());
        for (bit, &pin) in n.pins.iter().enumerate() {
            value.set(bit as u32, self.driven_value(pin)?);
        }
        Some(value)
    }

    /// Returns `true` if two pins share a connection point.
    pub fn connected(&self, a: PinId, b: PinId) -> bool {
        self.connectivity.same(a, b)
    }

    /// Pins on the connection point of `pin`, excluding pins of reclaimed nets.
    pub fn nexus_members(&self, pin: PinId) -> Vec<PinId> {
        self.connectivity
            .members(pin)
            .into_iter()
            .filter(|&p| match self.connectivity.owner(p) {
                PinOwner::Net { net, .. } => self.nets.contains(net),
                PinOwner::Device { .. } => true,
            })
            .collect()
    }

    /// Entity owning `pin`.
    pub fn pin_owner(&self, pin: PinId) -> PinOwner {
        self.connectivity.owner(pin)
    }

    /// Human-readable pin name: `top._s0[2]` for a net bit,
    /// `top._d1.DataA[3]` for a device terminal.
    pub fn pin_name(&self, pin: PinId) -> String {
        match self.connectivity.owner(pin) {
            PinOwner::Net { net, bit } => match self.try_net(net) {
                Some(n) => format!("{}[{bit}]", self.interner.resolve(n.name)),
                None => format!("<reclaimed net {}>[{bit}]", net.as_raw()),
            },
            PinOwner::Device { device, index } => {
                let d = &self.devices[device];
                match d.kind.terminal_at(index) {
                    Some(t) => format!("{}.{t}", self.interner.resolve(d.name)),
                    None => format!("{}.<pin {index}>", self.interner.resolve(d.name)),
                }
            }
        }
    }

    // ---- diagnostics ----

    /// Records a diagnostic; errors bump the error count.
    pub fn emit(&self, diag: Diagnostic) {
        self.sink.emit(diag);
    }

    /// Errors reported so far. Never decreases.
    pub fn error_count(&self) -> usize {
        self.sink.error_count()
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Renders `expr` in Verilog-like syntax with this design's net names.
    pub fn display_expr<'e>(&'e self, expr: &'e Expr) -> ExprDisplay<'e, 'a> {
        ExprDisplay::new(expr, self)
    }
}
