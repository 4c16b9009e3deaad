//! Fixed Makefile text around the generated rules.
//!
//! - `preamble` - conditional variables, platform detection, flag presets
//! - `TARGETS` - link, test, install and maintenance targets
//!
//! None of this depends on the source tree beyond the library directory name
//! and the selected `CXXFLAGS` preset.

pub const MAKEFILE_HEADER: &str = "# This file is generated by dmake, do not edit.\n\n";

pub const LISTING_HEADER: &str = "# no manual edits - this file is autogenerated by dmake\n\n";

/// `ifndef VAR` / `VAR=default` / `endif` block.
pub fn conditional_variable(variable: &str, default_value: &str) -> String {
    format!("ifndef {variable}\n    {variable}={default_value}\nendif\n\n")
}

/// Everything from the header comment up to the object lists.
pub fn preamble(library_dir: &str, cxxflags: &str) -> String {
    let library = library_dir.trim_end_matches('/');
    let mut out = String::from(MAKEFILE_HEADER);

    out.push_str("# To compile with rules, use 'make HAVE_RULES=yes'\n");
    out.push_str(&conditional_variable("HAVE_RULES", "no"));

    out.push_str(&format!("# folder where {library}/*.cpp files are located\n"));
    out.push_str(&conditional_variable("SRCDIR", library));
    out.push_str(MATCHCOMPILER);
    out.push_str(CFGDIR);
    out.push_str("RDYNAMIC=-rdynamic\n");
    out.push_str(PLATFORM);
    out.push_str(STRICT_ANSI);

    out.push_str(&conditional_variable("CXX", "g++"));
    out.push_str("ifeq (clang++, $(findstring clang++,$(CXX)))\n    CPPCHK_GLIBCXX_DEBUG=\nendif\n");
    out.push_str(&conditional_variable("CXXFLAGS", cxxflags));
    out.push_str(STD_FLAGS);
    out.push_str(HAVE_RULES);

    out.push_str(&conditional_variable("PREFIX", "/usr"));
    let includes = format!("-I{library} -Iexternals/simplecpp -Iexternals/tinyxml");
    out.push_str(&conditional_variable("INCLUDE_FOR_LIB", &includes));
    out.push_str(&conditional_variable("INCLUDE_FOR_CLI", &includes));
    out.push_str(&conditional_variable(
        "INCLUDE_FOR_TEST",
        &format!("-I{library} -Icli -Iexternals/simplecpp -Iexternals/tinyxml"),
    ));

    out.push_str(INSTALL_VARS);
    out.push_str("\n###### Object Files\n\n");
    out
}

const MATCHCOMPILER: &str = r#"ifeq ($(SRCDIR),build)
    ifdef VERIFY
        matchcompiler_S := $(shell python tools/matchcompiler.py --verify)
    else
        matchcompiler_S := $(shell python tools/matchcompiler.py)
    endif
endif

"#;

const CFGDIR: &str = r#"ifdef CFGDIR
    CFG=-DCFGDIR=\"$(CFGDIR)\"
else
    CFG=
endif

"#;

const PLATFORM: &str = r#"# Set the CPPCHK_GLIBCXX_DEBUG flag. This flag is not used in release Makefiles.
# The _GLIBCXX_DEBUG define doesn't work in Cygwin or other Win32 systems.
ifndef COMSPEC
    ifdef ComSpec
        #### ComSpec is defined on some WIN32's.
        COMSPEC=$(ComSpec)
    endif # ComSpec
endif # COMSPEC

ifdef COMSPEC
    #### Maybe Windows
    ifndef CPPCHK_GLIBCXX_DEBUG
        CPPCHK_GLIBCXX_DEBUG=
    endif # !CPPCHK_GLIBCXX_DEBUG

    ifeq ($(MSYSTEM),MINGW32 MINGW64)
        LDFLAGS=-lshlwapi
    else
        RDYNAMIC=-lshlwapi
    endif
else # !COMSPEC
    uname_S := $(shell sh -c 'uname -s 2>/dev/null || echo not')

    ifeq ($(uname_S),Linux)
        ifndef CPPCHK_GLIBCXX_DEBUG
            CPPCHK_GLIBCXX_DEBUG=-D_GLIBCXX_DEBUG
        endif # !CPPCHK_GLIBCXX_DEBUG
    endif # Linux

    ifeq ($(uname_S),GNU/kFreeBSD)
        ifndef CPPCHK_GLIBCXX_DEBUG
            CPPCHK_GLIBCXX_DEBUG=-D_GLIBCXX_DEBUG
        endif # !CPPCHK_GLIBCXX_DEBUG
    endif # GNU/kFreeBSD

endif # COMSPEC

"#;

const STRICT_ANSI: &str = r#"# Set the UNDEF_STRICT_ANSI flag to address compile time warnings
# with tinyxml2 and Cygwin.
ifdef COMSPEC
    uname_S := $(shell uname -s)

    ifneq (,$(findstring CYGWIN,$(uname_S)))
        UNDEF_STRICT_ANSI=-U__STRICT_ANSI__
    endif # CYGWIN
endif # COMSPEC

"#;

const STD_FLAGS: &str = r#"ifeq (g++, $(findstring g++,$(CXX)))
    override CXXFLAGS += -std=c++0x
else ifeq (clang++, $(findstring clang++,$(CXX)))
    override CXXFLAGS += -std=c++0x
else ifeq ($(CXX), c++)
    ifeq ($(shell uname -s), Darwin)
        override CXXFLAGS += -std=c++0x
    endif
endif

"#;

const HAVE_RULES: &str = r#"ifeq ($(HAVE_RULES),yes)
    override CXXFLAGS += -DHAVE_RULES -DTIXML_USE_STL $(shell pcre-config --cflags)
    ifdef LIBS
        LIBS += $(shell pcre-config --libs)
    else
        LIBS=$(shell pcre-config --libs)
    endif
endif

"#;

const INSTALL_VARS: &str = r#"BIN=$(DESTDIR)$(PREFIX)/bin

# For 'make man': sudo apt-get install xsltproc docbook-xsl docbook-xml on Linux
DB2MAN?=/usr/share/sgml/docbook/stylesheet/xsl/nwalsh/manpages/docbook.xsl
XP=xsltproc -''-nonet -''-param man.charmap.use.subset "0"
MAN_SOURCE=man/cppcheck.1.xml

"#;

/// Targets between the object lists and the compile rules.
pub const TARGETS: &str = r#".PHONY: run-dmake tags


###### Targets

cppcheck: $(LIBOBJ) $(CLIOBJ) $(EXTOBJ)
	$(CXX) $(CPPFLAGS) $(CXXFLAGS) -o $@ $(CLIOBJ) $(LIBOBJ) $(EXTOBJ) $(LIBS) $(LDFLAGS) $(RDYNAMIC)

all:	cppcheck testrunner

testrunner: $(TESTOBJ) $(LIBOBJ) $(EXTOBJ) cli/threadexecutor.o cli/cmdlineparser.o cli/cppcheckexecutor.o cli/filelister.o
	$(CXX) $(CPPFLAGS) $(CXXFLAGS) -o $@ $(TESTOBJ) $(LIBOBJ) cli/threadexecutor.o cli/cppcheckexecutor.o cli/cmdlineparser.o cli/filelister.o $(EXTOBJ) $(LIBS) $(LDFLAGS) $(RDYNAMIC)

test:	all
	./testrunner

check:	all
	./testrunner -q

checkcfg:	cppcheck
	./test/cfg/runtests.sh

run-dmake:
	dmake

reduce:	tools/reduce.o $(LIBOBJ) $(EXTOBJ)
	$(CXX) $(CPPFLAGS) $(CXXFLAGS) -g -o $@ tools/reduce.o $(INCLUDE_FOR_LIB) $(LIBOBJ) $(LIBS) $(EXTOBJ) $(LDFLAGS) $(RDYNAMIC)

clean:
	rm -f build/*.o lib/*.o cli/*.o test/*.o tools/*.o externals/*/*.o testrunner reduce cppcheck cppcheck.1

man:	man/cppcheck.1

man/cppcheck.1:	$(MAN_SOURCE)

	$(XP) $(DB2MAN) $(MAN_SOURCE)

tags:
	ctags -R --exclude=doxyoutput --exclude=test/cfg cli externals gui lib test

install: cppcheck
	install -d ${BIN}
	install cppcheck ${BIN}
	install addons/*.py ${BIN}
	install addons/*/*.py ${BIN}
	install htmlreport/cppcheck-htmlreport ${BIN}
ifdef CFGDIR
	install -d ${DESTDIR}${CFGDIR}
	install -m 644 cfg/* ${DESTDIR}${CFGDIR}
endif

# Validation of library files:
ConfigFiles := $(wildcard cfg/*.cfg)
ConfigFilesCHECKED := $(patsubst %.cfg,%.checked,$(ConfigFiles))
.PHONY: validateCFG
%.checked:%.cfg
	xmllint --noout --relaxng cfg/cppcheck-cfg.rng $<
validateCFG: ${ConfigFilesCHECKED}


###### Build

"#;
